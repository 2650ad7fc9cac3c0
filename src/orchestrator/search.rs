//! Question search.

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    orchestrator::{Orchestrator, OrchestratorError},
    questions::DedupIndex,
    session::{SessionError, SessionEvent, SessionHandle, SessionState},
    upstream::{QuestionQuery, RoleQuery},
};

impl Orchestrator {
    /// Run a full search for `role` on `session`.
    ///
    /// Starts a new generation, fetches the first batch of questions, enriches them and
    /// commits everything at once. Results are shown after the completion delay. Nothing
    /// partial is shown if any required stage fails.
    ///
    /// # Errors
    ///
    /// Returns the upstream error that failed the search, or an error if the session has
    /// closed. The session snapshot records the user-facing failure.
    pub async fn run_search(
        &self,
        session: &SessionHandle,
        role: RoleQuery,
    ) -> Result<SessionState, OrchestratorError> {
        let generation = session
            .apply(SessionEvent::SearchStarted { role: role.clone() })
            .await?
            .after
            .generation;

        info!(
            session_uuid = %session.uuid(),
            generation,
            job_title = %role.job_title,
            location = %role.location,
            "search started"
        );

        let query = QuestionQuery {
            role: role.clone(),
            batch_size: self.settings.batch_size,
            offset: 0,
            exclude: Vec::new(),
        };

        // Ids are settled before enrichment so masterclasses are keyed like the working set.
        let questions = match self.questions.search_questions(&query).await {
            Ok(fetched) => DedupIndex::default().admit_all(fetched),
            Err(error) => {
                warn!(generation, kind = error.kind(), %error, "question search failed");

                session
                    .apply(SessionEvent::SearchFailed {
                        generation,
                        error: SessionError::from_search(&error),
                    })
                    .await?;

                return Err(error.into());
            }
        };

        session.dispatch(SessionEvent::QuestionsFetched { generation });

        let enrichment = match self.enrich(session, generation, &role, &questions).await {
            Ok(enrichment) => enrichment,
            Err(error) => {
                warn!(generation, kind = error.kind(), %error, "enrichment failed");

                session
                    .apply(SessionEvent::SearchFailed {
                        generation,
                        error: SessionError::from_search(&error),
                    })
                    .await?;

                return Err(error.into());
            }
        };

        session
            .apply(SessionEvent::SearchCompleted {
                generation,
                questions,
                enrichment,
            })
            .await?;

        sleep(self.settings.completion_delay).await;

        let shown = session
            .apply(SessionEvent::ResultsShown { generation })
            .await?
            .after;

        if shown.generation == generation {
            info!(
                session_uuid = %session.uuid(),
                generation,
                questions = shown.questions.len(),
                masterclasses = shown.masterclasses.len(),
                "search completed"
            );
        } else {
            info!(
                session_uuid = %session.uuid(),
                generation,
                current = shown.generation,
                "search superseded before its results were shown"
            );
        }

        Ok(shown)
    }
}
