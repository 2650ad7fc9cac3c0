//! Session response bodies.

use hr_trainer::{
    intelligence::{
        AnswerEvaluation, CareerPath, Masterclass, NetworkingIntel, SalaryInsights,
        SimulationReport,
    },
    questions::{InterviewQuestion, QuestionStatus},
    session::{SearchProgress, SessionError, SessionState, SessionUuid, View},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuestionResponse {
    pub id: String,
    pub question: String,

    /// `Technical`, `Behavioral`, `Case Study` or `Cultural`
    pub category: String,

    /// `pass` or `fail` once an answer has been evaluated
    pub status: Option<String>,
}

impl From<InterviewQuestion> for QuestionResponse {
    fn from(question: InterviewQuestion) -> Self {
        Self {
            id: question.id.to_string(),
            question: question.question,
            category: question.category.to_string(),
            status: question.status.map(|status| {
                match status {
                    QuestionStatus::Pass => "pass",
                    QuestionStatus::Fail => "fail",
                }
                .to_owned()
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProgressResponse {
    /// 0 to 100
    pub percent: u8,
    pub stage: String,
    pub source: Option<String>,
    pub completed_steps: u8,
}

impl From<SearchProgress> for ProgressResponse {
    fn from(progress: SearchProgress) -> Self {
        Self {
            percent: progress.percent,
            stage: progress.stage,
            source: progress.source,
            completed_steps: progress.completed_steps,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionErrorResponse {
    /// `RATE_LIMIT_EXCEEDED` or `UPSTREAM_FAILURE`
    pub code: String,
    pub message: String,
}

impl From<SessionError> for SessionErrorResponse {
    fn from(error: SessionError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.user_message().to_owned(),
        }
    }
}

/// Snapshot of a session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub session: Uuid,
    pub generation: u64,
    pub job_title: String,
    pub location: String,

    /// `SEARCH` or `RESULTS`
    pub view: String,
    pub is_searching: bool,
    pub is_loading_more: bool,
    pub progress: ProgressResponse,
    pub error: Option<SessionErrorResponse>,
    pub questions: Vec<QuestionResponse>,
    pub has_career_path: bool,
    pub has_salary: bool,
    pub has_networking: bool,

    /// Questions whose masterclass is already cached
    pub masterclasses: Vec<String>,
}

impl SessionResponse {
    pub(crate) fn new(uuid: SessionUuid, state: SessionState) -> Self {
        let mut masterclasses: Vec<String> =
            state.masterclasses.keys().map(ToString::to_string).collect();

        masterclasses.sort_unstable();

        Self {
            session: uuid.into_uuid(),
            generation: state.generation,
            job_title: state.role.job_title,
            location: state.role.location,
            view: match state.view {
                View::Search => "SEARCH",
                View::Results => "RESULTS",
            }
            .to_owned(),
            is_searching: state.is_searching,
            is_loading_more: state.is_loading_more,
            progress: state.progress.into(),
            error: state.error.map(Into::into),
            questions: state.questions.into_iter().map(Into::into).collect(),
            has_career_path: state.career_path.is_some(),
            has_salary: state.salary.is_some(),
            has_networking: state.networking.is_some(),
            masterclasses,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuestionsResponse {
    pub questions: Vec<QuestionResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CareerPathResponse {
    #[salvo(schema(value_type = Object))]
    pub career_path: CareerPath,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalaryResponse {
    #[salvo(schema(value_type = Object))]
    pub salary: SalaryInsights,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NetworkingResponse {
    #[salvo(schema(value_type = Object))]
    pub networking: NetworkingIntel,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MasterclassResponse {
    pub question: String,

    #[salvo(schema(value_type = Object))]
    pub masterclass: Masterclass,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EvaluationResponse {
    pub question: String,

    #[salvo(schema(value_type = Object))]
    pub evaluation: AnswerEvaluation,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SimulationReportResponse {
    /// Whether the score reaches the pass mark
    pub passed: bool,

    #[salvo(schema(value_type = Object))]
    pub report: SimulationReport,
}

#[cfg(test)]
mod tests {
    use hr_trainer::questions::QuestionCategory;

    use super::*;

    #[test]
    fn evaluated_questions_carry_their_status() {
        let mut question =
            InterviewQuestion::new("q1", "Size the EV market", QuestionCategory::CaseStudy);
        question.status = Some(QuestionStatus::Fail);

        let response = QuestionResponse::from(question);

        assert_eq!(response.category, "Case Study");
        assert_eq!(response.status.as_deref(), Some("fail"));
    }

    #[test]
    fn fresh_sessions_are_on_the_search_view() {
        let uuid = SessionUuid::new_random();
        let response = SessionResponse::new(uuid, SessionState::default());

        assert_eq!(response.session, uuid.into_uuid());
        assert_eq!(response.view, "SEARCH");
        assert!(response.questions.is_empty(), "fresh session has no questions");
        assert!(response.error.is_none(), "fresh session has no error");
    }
}
