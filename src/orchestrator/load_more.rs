//! Incremental load-more.

use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    orchestrator::{Orchestrator, OrchestratorError, fetch_masterclasses},
    questions::InterviewQuestion,
    session::{SessionError, SessionEvent, SessionHandle},
    upstream::QuestionQuery,
};

/// Result of [`Orchestrator::load_more`].
#[derive(Debug)]
pub enum LoadMoreOutcome {
    /// The batch was committed.
    Appended {
        /// Questions that were new to the working set, in received order.
        appended: Vec<InterviewQuestion>,

        /// Working set size afterwards.
        total: usize,

        /// Background masterclass fetch for `appended`, if any were added. Awaiting it
        /// is optional.
        background: Option<JoinHandle<()>>,
    },

    /// Another load-more is still running on this session.
    AlreadyRunning,
}

impl Orchestrator {
    /// Fetch the next batch of questions and append the ones not already held.
    ///
    /// Masterclasses for the appended questions are fetched in the background and merged
    /// into the cache when they arrive.
    ///
    /// # Errors
    ///
    /// Returns an error if no search has run, a search is in progress, the fetch fails,
    /// or the session has closed.
    pub async fn load_more(
        &self,
        session: &SessionHandle,
    ) -> Result<LoadMoreOutcome, OrchestratorError> {
        let Some(_guard) = session.try_begin_load_more() else {
            debug!(session_uuid = %session.uuid(), "load more already running");

            return Ok(LoadMoreOutcome::AlreadyRunning);
        };

        let snapshot = session.snapshot();

        if !snapshot.has_role() {
            return Err(OrchestratorError::NoSearch);
        }

        if snapshot.is_searching {
            return Err(OrchestratorError::SearchInProgress);
        }

        let generation = snapshot.generation;
        let started = session
            .apply(SessionEvent::LoadMoreStarted { generation })
            .await?
            .after;

        let query = QuestionQuery {
            role: started.role.clone(),
            batch_size: self.settings.batch_size,
            offset: started.questions.len(),
            exclude: started
                .questions
                .iter()
                .map(|question| question.question.clone())
                .collect(),
        };

        let fetched = match self.questions.search_questions(&query).await {
            Ok(fetched) => fetched,
            Err(error) => {
                warn!(generation, kind = error.kind(), %error, "load more failed");

                session
                    .apply(SessionEvent::LoadMoreFailed {
                        generation,
                        error: SessionError::from_load_more(&error),
                    })
                    .await?;

                return Err(error.into());
            }
        };

        sleep(self.settings.settle_delay).await;

        let received = fetched.len();
        let transition = session
            .apply(SessionEvent::LoadMoreCompleted {
                generation,
                questions: fetched,
            })
            .await?;

        let appended = transition
            .after
            .questions
            .get(transition.before.questions.len()..)
            .unwrap_or_default()
            .to_vec();

        info!(
            session_uuid = %session.uuid(),
            generation,
            received,
            appended = appended.len(),
            total = transition.after.questions.len(),
            "load more committed"
        );

        let background = (!appended.is_empty()).then(|| {
            let source = std::sync::Arc::clone(&self.intelligence);
            let role = transition.after.role.clone();
            let concurrency = self.settings.masterclass_concurrency;
            let session = session.clone();
            let subset = appended.clone();

            tokio::spawn(async move {
                let masterclasses = fetch_masterclasses(source, role, subset, concurrency).await;

                if !masterclasses.is_empty() {
                    session.dispatch(SessionEvent::MasterclassesMerged {
                        generation,
                        masterclasses,
                    });
                }
            })
        });

        Ok(LoadMoreOutcome::Appended {
            appended,
            total: transition.after.questions.len(),
            background,
        })
    }
}
