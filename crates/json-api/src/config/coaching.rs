//! Coaching Config

use std::time::Duration;

use clap::Args;
use hr_trainer::{
    orchestrator::{EnrichmentPolicy, OrchestratorSettings},
    questions::BATCH_SIZE,
};

/// Session lifetime and orchestration tuning.
#[derive(Debug, Args)]
pub struct CoachingConfig {
    /// Seconds a session may sit unused before it is evicted
    #[arg(long, env = "SESSION_IDLE_TIMEOUT_SECONDS", default_value_t = 3_600_u64)]
    pub session_idle_timeout_seconds: u64,

    /// Seconds between idle-session sweeps
    #[arg(long, env = "SESSION_SWEEP_INTERVAL_SECONDS", default_value_t = 60_u64)]
    pub session_sweep_interval_seconds: u64,

    /// Seconds between background refreshes of the active token list
    #[arg(long, env = "TOKEN_BOARD_REFRESH_SECONDS", default_value_t = 10_u64)]
    pub token_board_refresh_seconds: u64,

    /// Questions requested per search or load-more
    #[arg(long, env = "QUESTION_BATCH_SIZE", default_value_t = BATCH_SIZE)]
    pub question_batch_size: usize,

    /// Pause between a completed search and showing results, in milliseconds
    #[arg(long, env = "COMPLETION_DELAY_MS", default_value_t = 500_u64)]
    pub completion_delay_ms: u64,

    /// Pause before a load-more batch is committed, in milliseconds
    #[arg(long, env = "SETTLE_DELAY_MS", default_value_t = 500_u64)]
    pub settle_delay_ms: u64,

    /// How enrichment failures affect a search (fail-batch, isolate)
    #[arg(long, env = "ENRICHMENT_POLICY", default_value_t = EnrichmentPolicy::FailBatch)]
    pub enrichment_policy: EnrichmentPolicy,

    /// Maximum concurrent masterclass fetches per batch
    #[arg(long, env = "MASTERCLASS_CONCURRENCY", default_value_t = 8_usize)]
    pub masterclass_concurrency: usize,
}

impl CoachingConfig {
    #[must_use]
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            batch_size: self.question_batch_size.max(1),
            completion_delay: Duration::from_millis(self.completion_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            enrichment_policy: self.enrichment_policy,
            masterclass_concurrency: self.masterclass_concurrency.max(1),
        }
    }

    #[must_use]
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_seconds)
    }

    #[must_use]
    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_seconds.max(1))
    }

    #[must_use]
    pub fn token_board_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.token_board_refresh_seconds.max(1))
    }
}
