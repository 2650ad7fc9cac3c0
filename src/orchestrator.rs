//! Search orchestration
//!
//! Drives a session through question search, parallel enrichment and incremental
//! load-more. All state changes go through the session's actor as events.

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    questions::{BATCH_SIZE, QuestionId},
    session::SessionClosed,
    upstream::{IntelligenceSource, QuestionSource, UpstreamError},
};

pub mod enrichment;
pub mod load_more;
pub mod search;
pub mod views;

pub use enrichment::{EnrichmentPolicy, UnknownPolicy, fetch_masterclasses};
pub use load_more::LoadMoreOutcome;

/// Default pause between completing a search and showing results.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// Default pause before committing a load-more batch.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Default cap on concurrent masterclass fetches.
pub const DEFAULT_MASTERCLASS_CONCURRENCY: usize = 8;

/// Orchestration tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub batch_size: usize,
    pub completion_delay: Duration,
    pub settle_delay: Duration,
    pub enrichment_policy: EnrichmentPolicy,
    pub masterclass_concurrency: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            completion_delay: DEFAULT_COMPLETION_DELAY,
            settle_delay: DEFAULT_SETTLE_DELAY,
            enrichment_policy: EnrichmentPolicy::default(),
            masterclass_concurrency: DEFAULT_MASTERCLASS_CONCURRENCY,
        }
    }
}

/// Orchestration failure returned to the caller.
///
/// The session snapshot carries the user-facing error separately.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    SessionClosed(#[from] SessionClosed),

    /// The session has no role yet.
    #[error("no search has been run for this session")]
    NoSearch,

    /// A search is still running.
    #[error("a search is already running")]
    SearchInProgress,

    #[error("question {0} is not in the working set")]
    UnknownQuestion(QuestionId),
}

/// Runs searches, load-mores and lazy intelligence fetches against the collaborators.
#[derive(Clone)]
pub struct Orchestrator {
    questions: Arc<dyn QuestionSource>,
    intelligence: Arc<dyn IntelligenceSource>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionSource>,
        intelligence: Arc<dyn IntelligenceSource>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            questions,
            intelligence,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
