//! Search Handler

use hr_trainer::upstream::RoleQuery;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{Instrument as _, debug};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{errors::session_or_404, responses::SessionResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchRequest {
    pub job_title: String,

    #[serde(default)]
    pub location: String,
}

/// Start Search
///
/// Starts a search for the role in the background and returns the session as soon as
/// the search has begun. Poll the session for progress. A new search supersedes any
/// search still running on the session.
#[endpoint(
    tags("sessions"),
    summary = "Start Search",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Search started"),
        (status_code = StatusCode::BAD_REQUEST, description = "Job title missing"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    json: JsonBody<SearchRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;
    let request = json.into_inner();

    if request.job_title.trim().is_empty() {
        return Err(StatusError::bad_request().brief("job_title is required"));
    }

    let role = RoleQuery::new(request.job_title.trim(), request.location.trim());
    let previous_generation = session.snapshot().generation;
    let mut updates = session.subscribe();

    let orchestrator = state.app.orchestrator.clone();
    let running = session.clone();

    tokio::spawn(
        async move {
            if let Err(error) = orchestrator.run_search(&running, role).await {
                debug!(session_uuid = %running.uuid(), "search ended without results: {error}");
            }
        }
        .in_current_span(),
    );

    let started = updates
        .wait_for(|snapshot| snapshot.generation > previous_generation)
        .await
        .map(|snapshot| snapshot.clone())
        .or_500("session stopped before the search started")?;

    res.status_code(StatusCode::ACCEPTED);

    Ok(Json(SessionResponse::new(session.uuid(), started)))
}
