//! Simulation Report Handler

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
        responses::SimulationReportResponse,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SimulationRequest {
    /// Interview transcript, one line per entry
    pub transcript: Vec<String>,
}

/// Assess Simulation
///
/// Scores a full interview transcript out of 100 for the session's role.
#[endpoint(
    tags("sessions"),
    summary = "Assess Simulation",
    responses(
        (status_code = StatusCode::OK, description = "Simulation report"),
        (status_code = StatusCode::BAD_REQUEST, description = "Transcript empty"),
        (status_code = StatusCode::CONFLICT, description = "No search yet"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    json: JsonBody<SimulationRequest>,
    depot: &mut Depot,
) -> Result<Json<SimulationReportResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let transcript: Vec<String> = json
        .into_inner()
        .transcript
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if transcript.is_empty() {
        return Err(StatusError::bad_request().brief("transcript is empty"));
    }

    let report = state
        .app
        .orchestrator
        .simulation_report(&session, &transcript)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SimulationReportResponse {
        passed: report.passed(),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use hr_trainer::{
        intelligence::SimulationReport,
        upstream::{MockIntelligenceSource, MockQuestionSource},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{idle_state, question, searched_session, service, state_with_sources};

    use super::*;

    fn route() -> Router {
        Router::with_path("sessions/{session}/simulation-report").post(handler)
    }

    #[tokio::test]
    async fn blank_lines_are_dropped_before_assessment() -> TestResult {
        let mut intelligence = MockIntelligenceSource::new();

        intelligence
            .expect_simulation_report()
            .once()
            .withf(|_, transcript| transcript == ["Q: Why us?", "A: Your mission"])
            .return_once(|_, _| {
                Ok(SimulationReport {
                    score: 72,
                    feedback: "Solid".to_owned(),
                    strengths: vec!["Structure".to_owned()],
                    improvements: Vec::new(),
                    red_flags: Vec::new(),
                })
            });

        let state = state_with_sources(MockQuestionSource::new(), intelligence);
        let session = searched_session(&state, vec![question("q1", "Explain ownership")]).await;

        let response: SimulationReportResponse = TestClient::post(format!(
            "http://example.com/sessions/{}/simulation-report",
            session.uuid()
        ))
        .json(&json!({ "transcript": ["Q: Why us?", "  ", "A: Your mission"] }))
        .send(&service(state, route()))
        .await
        .take_json()
        .await?;

        assert!(response.passed, "72 is above the pass mark");
        assert_eq!(response.report.score, 72);

        Ok(())
    }

    #[tokio::test]
    async fn empty_transcript_returns_400() {
        let state = idle_state();
        let session = searched_session(&state, vec![question("q1", "Explain ownership")]).await;

        let res = TestClient::post(format!(
            "http://example.com/sessions/{}/simulation-report",
            session.uuid()
        ))
        .json(&json!({ "transcript": [" "] }))
        .send(&service(state, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
