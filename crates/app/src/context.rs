//! App Context

use std::{sync::Arc, time::Duration};

use hr_trainer::{
    clock::SystemClock,
    orchestrator::{Orchestrator, OrchestratorSettings},
    tokens::{ActiveTokenBoard, TokenLifecycle, TokenSecret, TokenService, TokenStore},
    upstream::{IntelligenceSource, QuestionSource},
};
use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database,
    gemini::{GeminiClient, GeminiConfig},
    sessions::SessionRegistry,
    tokens::PgTokenStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Everything needed to build an [`AppContext`].
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub run_migrations: bool,
    pub signing_secret: TokenSecret,
    pub gemini: GeminiConfig,
    pub orchestrator: OrchestratorSettings,
    pub session_idle_timeout: Duration,
}

#[derive(Clone)]
pub struct AppContext {
    pub tokens: Arc<dyn TokenService>,
    pub board: Arc<ActiveTokenBoard>,
    pub orchestrator: Orchestrator,
    pub sessions: Arc<SessionRegistry>,
}

impl AppContext {
    /// Build application context backed by PostgreSQL and Gemini.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or migrating it fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if config.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        let gemini = Arc::new(GeminiClient::new(config.gemini));

        Ok(Self::from_parts(
            Arc::new(PgTokenStore::new(pool)),
            config.signing_secret,
            gemini.clone(),
            gemini,
            config.orchestrator,
            config.session_idle_timeout,
        ))
    }

    /// Assemble a context from explicit collaborators.
    #[must_use]
    pub fn from_parts(
        store: Arc<dyn TokenStore>,
        signing_secret: TokenSecret,
        questions: Arc<dyn QuestionSource>,
        intelligence: Arc<dyn IntelligenceSource>,
        settings: OrchestratorSettings,
        session_idle_timeout: Duration,
    ) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(TokenLifecycle::new(
            store,
            signing_secret,
            Arc::new(SystemClock),
        ));

        Self {
            board: Arc::new(ActiveTokenBoard::new(Arc::clone(&tokens))),
            tokens,
            orchestrator: Orchestrator::new(questions, intelligence, settings),
            sessions: Arc::new(SessionRegistry::new(session_idle_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use hr_trainer::{
        tokens::{InMemoryTokenStore, TokenTtl},
        upstream::{MockIntelligenceSource, MockQuestionSource},
    };
    use testresult::TestResult;

    use super::*;

    fn context() -> AppContext {
        AppContext::from_parts(
            Arc::new(InMemoryTokenStore::new()),
            TokenSecret::new("context-secret"),
            Arc::new(MockQuestionSource::new()),
            Arc::new(MockIntelligenceSource::new()),
            OrchestratorSettings::default(),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn board_and_service_share_the_same_store() -> TestResult {
        let context = context();

        let issued = context.board.issue(TokenTtl::OneHour).await?;
        let listed = context.tokens.list_active().await?;

        assert_eq!(listed, vec![issued.record.clone()]);
        assert_eq!(context.board.entries().await, vec![issued.record]);

        Ok(())
    }

    #[tokio::test]
    async fn issued_tokens_unlock_exactly_once() -> TestResult {
        let context = context();
        let issued = context.tokens.issue(TokenTtl::OneDay).await?;

        assert!(hr_trainer::tokens::unlock(context.tokens.as_ref(), issued.token.as_str()).await);
        assert!(!hr_trainer::tokens::unlock(context.tokens.as_ref(), issued.token.as_str()).await);

        Ok(())
    }
}
