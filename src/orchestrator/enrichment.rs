//! Parallel enrichment.

use std::{fmt, future::Future, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, warn};

use crate::{
    orchestrator::Orchestrator,
    questions::InterviewQuestion,
    session::{Enrichment, EnrichmentStep, SessionEvent, SessionHandle, events::MasterclassMap},
    upstream::{IntelligenceSource, RoleQuery, UpstreamError},
};

/// How a failed enrichment branch affects the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentPolicy {
    /// Any branch failure fails the search.
    #[default]
    FailBatch,

    /// Failed branches leave their bundle empty.
    Isolate,
}

impl fmt::Display for EnrichmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FailBatch => "fail-batch",
            Self::Isolate => "isolate",
        })
    }
}

/// Policy name was not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown enrichment policy `{0}`, expected `fail-batch` or `isolate`")]
pub struct UnknownPolicy(pub String);

impl FromStr for EnrichmentPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-batch" | "fail_batch" => Ok(Self::FailBatch),
            "isolate" => Ok(Self::Isolate),
            _ => Err(UnknownPolicy(value.to_string())),
        }
    }
}

impl Orchestrator {
    /// Run the four enrichment branches concurrently under the configured policy.
    pub(crate) async fn enrich(
        &self,
        session: &SessionHandle,
        generation: u64,
        role: &RoleQuery,
        questions: &[InterviewQuestion],
    ) -> Result<Enrichment, UpstreamError> {
        let intelligence = self.intelligence.as_ref();

        let career_path = settle(session, generation, EnrichmentStep::CareerPath, async {
            intelligence.career_path(role).await
        });
        let salary = settle(session, generation, EnrichmentStep::Salary, async {
            intelligence.salary(role).await
        });
        let networking = settle(session, generation, EnrichmentStep::Networking, async {
            intelligence.networking(role).await
        });
        let masterclasses = settle(session, generation, EnrichmentStep::Masterclasses, async {
            Ok(fetch_masterclasses(
                Arc::clone(&self.intelligence),
                role.clone(),
                questions.to_vec(),
                self.settings.masterclass_concurrency,
            )
            .await)
        });

        match self.settings.enrichment_policy {
            EnrichmentPolicy::FailBatch => {
                let (career_path, salary, networking, masterclasses) =
                    tokio::try_join!(career_path, salary, networking, masterclasses)?;

                Ok(Enrichment {
                    career_path: Some(career_path),
                    salary: Some(salary),
                    networking: Some(networking),
                    masterclasses,
                })
            }
            EnrichmentPolicy::Isolate => {
                let (career_path, salary, networking, masterclasses) =
                    tokio::join!(career_path, salary, networking, masterclasses);

                Ok(Enrichment {
                    career_path: isolated(EnrichmentStep::CareerPath, career_path),
                    salary: isolated(EnrichmentStep::Salary, salary),
                    networking: isolated(EnrichmentStep::Networking, networking),
                    masterclasses: masterclasses.unwrap_or_default(),
                })
            }
        }
    }
}

/// Await a branch and report it as a completed step, whatever the outcome.
async fn settle<T>(
    session: &SessionHandle,
    generation: u64,
    step: EnrichmentStep,
    branch: impl Future<Output = Result<T, UpstreamError>>,
) -> Result<T, UpstreamError> {
    let result = branch.await;

    session.dispatch(SessionEvent::EnrichmentStepCompleted { generation, step });

    result
}

fn isolated<T>(step: EnrichmentStep, result: Result<T, UpstreamError>) -> Option<T> {
    result
        .inspect_err(|error| {
            warn!(step = step.as_str(), kind = error.kind(), %error, "enrichment branch failed");
        })
        .ok()
}

/// Fetch masterclasses for `questions`, at most `concurrency` at a time.
///
/// Never fails: items whose fetch fails are logged and left out.
pub async fn fetch_masterclasses(
    source: Arc<dyn IntelligenceSource>,
    role: RoleQuery,
    questions: Vec<InterviewQuestion>,
    concurrency: usize,
) -> MasterclassMap {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let role = Arc::new(role);
    let mut tasks = JoinSet::new();

    for question in questions {
        let source = Arc::clone(&source);
        let permits = Arc::clone(&permits);
        let role = Arc::clone(&role);

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok()?;

            match source.masterclass(&role, &question).await {
                Ok(masterclass) => Some((question.id, masterclass)),
                Err(error) => {
                    warn!(
                        question_id = %question.id,
                        kind = error.kind(),
                        %error,
                        "masterclass fetch failed"
                    );

                    None
                }
            }
        });
    }

    let mut masterclasses = MasterclassMap::default();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some((id, masterclass))) => {
                masterclasses.insert(id, masterclass);
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "masterclass task did not complete"),
        }
    }

    debug!(fetched = masterclasses.len(), "masterclass batch finished");

    masterclasses
}
