//! Coaching sessions
//!
//! A session's state only changes through [`reduce`], applied in order by the actor
//! behind a [`SessionHandle`].

pub mod errors;
pub mod events;
pub mod handle;
pub mod progress;
pub mod reducer;
pub mod state;

pub use errors::{SessionClosed, SessionError};
pub use events::{CachedIntelligence, Enrichment, EnrichmentStep, SessionEvent};
pub use handle::{LoadMoreGuard, SessionHandle, Transition};
pub use progress::SearchProgress;
pub use reducer::reduce;
pub use state::{SessionState, SessionUuid, View};
