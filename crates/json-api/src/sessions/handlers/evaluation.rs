//! Answer Evaluation Handler

use hr_trainer::questions::QuestionId;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::{into_status_error, session_or_404},
        responses::EvaluationResponse,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EvaluationRequest {
    pub answer: String,
}

/// Evaluate Answer
///
/// Scores a written answer out of 10 and marks the question as passed or failed.
#[endpoint(
    tags("sessions"),
    summary = "Evaluate Answer",
    responses(
        (status_code = StatusCode::OK, description = "Evaluation"),
        (status_code = StatusCode::BAD_REQUEST, description = "Answer missing"),
        (status_code = StatusCode::NOT_FOUND, description = "Session or question not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Upstream failure"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    question: PathParam<String>,
    json: JsonBody<EvaluationRequest>,
    depot: &mut Depot,
) -> Result<Json<EvaluationResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;
    let question = QuestionId::new(question.into_inner());
    let answer = json.into_inner().answer;

    if answer.trim().is_empty() {
        return Err(StatusError::bad_request().brief("answer is required"));
    }

    let evaluation = state
        .app
        .orchestrator
        .evaluate_answer(&session, &question, answer.trim())
        .await
        .map_err(into_status_error)?;

    Ok(Json(EvaluationResponse {
        question: question.to_string(),
        evaluation,
    }))
}

#[cfg(test)]
mod tests {
    use hr_trainer::{
        intelligence::AnswerEvaluation,
        questions::QuestionStatus,
        upstream::{MockIntelligenceSource, MockQuestionSource, UpstreamError},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{idle_state, question, searched_session, service, state_with_sources};

    use super::*;

    fn route() -> Router {
        Router::with_path("sessions/{session}/questions/{question}/evaluation").post(handler)
    }

    #[tokio::test]
    async fn records_the_outcome_on_the_question() -> TestResult {
        let mut intelligence = MockIntelligenceSource::new();

        intelligence
            .expect_evaluate_answer()
            .once()
            .withf(|_, question, answer| question.id.as_str() == "q1" && answer == "Moves")
            .return_once(|_, _, _| {
                Ok(AnswerEvaluation {
                    score: 8,
                    feedback: "Clear and concise".to_owned(),
                    improvements: Vec::new(),
                    status: QuestionStatus::Pass,
                })
            });

        let state = state_with_sources(MockQuestionSource::new(), intelligence);
        let session = searched_session(&state, vec![question("q1", "Explain ownership")]).await;

        let response: EvaluationResponse = TestClient::post(format!(
            "http://example.com/sessions/{}/questions/q1/evaluation",
            session.uuid()
        ))
        .json(&json!({ "answer": " Moves " }))
        .send(&service(state, route()))
        .await
        .take_json()
        .await?;

        assert_eq!(response.evaluation.score, 8);
        assert_eq!(
            session.snapshot().questions.first().and_then(|q| q.status),
            Some(QuestionStatus::Pass)
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_answer_returns_400() {
        let state = idle_state();
        let session = searched_session(&state, vec![question("q1", "Explain ownership")]).await;

        let res = TestClient::post(format!(
            "http://example.com/sessions/{}/questions/q1/evaluation",
            session.uuid()
        ))
        .json(&json!({ "answer": "  " }))
        .send(&service(state, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn rate_limited_evaluation_returns_429() {
        let mut intelligence = MockIntelligenceSource::new();

        intelligence
            .expect_evaluate_answer()
            .once()
            .return_once(|_, _, _| Err(UpstreamError::RateLimited));

        let state = state_with_sources(MockQuestionSource::new(), intelligence);
        let session = searched_session(&state, vec![question("q1", "Explain ownership")]).await;

        let res = TestClient::post(format!(
            "http://example.com/sessions/{}/questions/q1/evaluation",
            session.uuid()
        ))
        .json(&json!({ "answer": "Moves" }))
        .send(&service(state, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(session.snapshot().questions.first().and_then(|q| q.status), None);
    }
}
