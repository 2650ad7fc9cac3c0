//! Masterclass Handler

use hr_trainer::questions::QuestionId;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::{into_status_error, session_or_404},
        responses::MasterclassResponse,
    },
};

/// Get Masterclass
///
/// Returns the cached masterclass for a question, fetching and caching it first if the
/// background preparation has not produced one.
#[endpoint(
    tags("sessions"),
    summary = "Get Masterclass",
    responses(
        (status_code = StatusCode::OK, description = "Masterclass"),
        (status_code = StatusCode::NOT_FOUND, description = "Session or question not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Upstream failure"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    question: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MasterclassResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;
    let question = QuestionId::new(question.into_inner());

    let masterclass = state
        .app
        .orchestrator
        .masterclass(&session, &question)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MasterclassResponse {
        question: question.to_string(),
        masterclass,
    }))
}
