//! Collaborator seams for question search and intelligence generation.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    intelligence::{
        AnswerEvaluation, CareerPath, Masterclass, NetworkingIntel, SalaryInsights, SchemaError,
        SimulationReport,
    },
    questions::InterviewQuestion,
};

/// Role a session is preparing for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleQuery {
    pub job_title: String,
    pub location: String,
}

impl RoleQuery {
    #[must_use]
    pub fn new(job_title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            location: location.into(),
        }
    }
}

/// One page of questions to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub role: RoleQuery,
    pub batch_size: usize,
    pub offset: usize,

    /// Full texts of questions already held. The source should avoid repeating them.
    pub exclude: Vec<String>,
}

/// Collaborator failure.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Quota exhausted. The user can retry later or supply their own key.
    #[error("upstream rate limit exceeded")]
    RateLimited,

    /// Any other transport or API failure.
    #[error("upstream request failed: {0}")]
    Failure(String),

    /// Response did not pass validation.
    #[error("upstream returned an invalid response")]
    InvalidResponse(#[from] SchemaError),
}

impl UpstreamError {
    /// Stable code for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited => "RATE_LIMIT_EXCEEDED",
            Self::Failure(_) | Self::InvalidResponse(_) => "UPSTREAM_FAILURE",
        }
    }
}

#[automock]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `query.batch_size` questions for the role.
    async fn search_questions(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<InterviewQuestion>, UpstreamError>;
}

#[automock]
#[async_trait]
pub trait IntelligenceSource: Send + Sync {
    async fn career_path(&self, role: &RoleQuery) -> Result<CareerPath, UpstreamError>;

    async fn salary(&self, role: &RoleQuery) -> Result<SalaryInsights, UpstreamError>;

    async fn networking(&self, role: &RoleQuery) -> Result<NetworkingIntel, UpstreamError>;

    async fn masterclass(
        &self,
        role: &RoleQuery,
        question: &InterviewQuestion,
    ) -> Result<Masterclass, UpstreamError>;

    /// Score a written answer out of 10.
    async fn evaluate_answer(
        &self,
        role: &RoleQuery,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<AnswerEvaluation, UpstreamError>;

    /// Assess a full interview transcript, one line per entry.
    async fn simulation_report(
        &self,
        role: &RoleQuery,
        transcript: &[String],
    ) -> Result<SimulationReport, UpstreamError>;
}
