//! Load More Handler

use hr_trainer::orchestrator::LoadMoreOutcome;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::{into_status_error, session_or_404},
        responses::QuestionResponse,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoadMoreResponse {
    /// Questions that were new to the session, in received order
    pub appended: Vec<QuestionResponse>,

    /// Working set size afterwards
    pub total: usize,
}

/// Load More Questions
///
/// Fetches the next batch and appends the questions the session does not already hold.
/// Masterclasses for the new questions are prepared in the background.
#[endpoint(
    tags("sessions"),
    summary = "Load More Questions",
    responses(
        (status_code = StatusCode::OK, description = "Batch appended"),
        (status_code = StatusCode::CONFLICT, description = "No search yet, a search is running, or a load-more is already running"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Upstream failure"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<LoadMoreResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    match state
        .app
        .orchestrator
        .load_more(&session)
        .await
        .map_err(into_status_error)?
    {
        LoadMoreOutcome::Appended {
            appended, total, ..
        } => Ok(Json(LoadMoreResponse {
            appended: appended.into_iter().map(Into::into).collect(),
            total,
        })),
        LoadMoreOutcome::AlreadyRunning => {
            Err(StatusError::conflict().brief("More questions are already being loaded"))
        }
    }
}
