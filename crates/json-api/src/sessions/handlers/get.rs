//! Get Session Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{errors::session_or_404, responses::SessionResponse},
};

/// Get Session
///
/// Returns the current snapshot, including search progress while a search runs.
#[endpoint(
    tags("sessions"),
    summary = "Get Session",
    responses(
        (status_code = StatusCode::OK, description = "Session snapshot"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    Ok(Json(SessionResponse::new(session.uuid(), session.snapshot())))
}
