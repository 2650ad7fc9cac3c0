//! Coaching intelligence bundles and the decode boundary they cross.

pub mod bundles;
pub mod reports;
pub mod schema;

pub use bundles::{
    CareerPath, Masterclass, NetworkingIntel, OutreachScript, RoadmapStage, SalaryBands,
    SalaryInsights,
};
pub use reports::{AnswerEvaluation, SimulationReport};
pub use schema::{SchemaError, Validate, decode_bundle, decode_questions};
