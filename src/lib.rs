//! HR Trainer
//!
//! Core of the HR Trainer interview preparation backend: signed single-use access
//! tokens, the question working set with de-duplication, validated coaching
//! intelligence, and the session orchestration that ties a search, its parallel
//! enrichment and incremental load-more together.

pub mod clock;
pub mod intelligence;
pub mod orchestrator;
pub mod prelude;
pub mod questions;
pub mod session;
pub mod tokens;
pub mod upstream;
pub mod uuids;
