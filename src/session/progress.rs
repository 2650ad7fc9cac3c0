//! Search progress.

use serde::Serialize;

use crate::session::EnrichmentStep;

/// Progress once a search has started.
pub const STARTED_PERCENT: u8 = 10;

/// Progress once questions have been fetched.
pub const QUESTIONS_FETCHED_PERCENT: u8 = 30;

/// Progress never passes this until the search completes.
pub const ENRICHMENT_CEILING_PERCENT: u8 = 95;

/// Progress of a completed search.
pub const COMPLETE_PERCENT: u8 = 100;

/// Enrichment branches run per search.
pub const ENRICHMENT_STEPS: u8 = 4;

const ENRICHMENT_SPAN: u16 = 70;

/// Progress after `completed` enrichment steps: `min(30 + completed * 70 / 4, 95)`.
#[must_use]
pub fn enrichment_percent(completed: u8) -> u8 {
    let gained = u16::from(completed) * ENRICHMENT_SPAN / u16::from(ENRICHMENT_STEPS);
    let percent = u16::from(QUESTIONS_FETCHED_PERCENT) + gained;

    u8::try_from(percent)
        .unwrap_or(u8::MAX)
        .min(ENRICHMENT_CEILING_PERCENT)
}

/// Progress of the running or last search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchProgress {
    pub percent: u8,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub completed_steps: u8,
}

impl SearchProgress {
    pub(crate) fn started() -> Self {
        Self {
            percent: STARTED_PERCENT,
            stage: "Connecting to the intelligence source".to_string(),
            source: Some("Opening search session".to_string()),
            completed_steps: 0,
        }
    }

    pub(crate) fn questions_fetched(&mut self) {
        self.percent = QUESTIONS_FETCHED_PERCENT;
        self.stage = "Question library received".to_string();
        self.source = Some("Community forums, interview reports".to_string());
    }

    pub(crate) fn step_completed(&mut self, step: EnrichmentStep) {
        self.completed_steps = self.completed_steps.saturating_add(1).min(ENRICHMENT_STEPS);
        self.percent = enrichment_percent(self.completed_steps);
        self.stage = step.stage().to_string();
        self.source = Some(step.source().to_string());
    }

    pub(crate) fn complete(&mut self) {
        self.percent = COMPLETE_PERCENT;
        self.stage = "Complete".to_string();
        self.source = None;
    }
}
