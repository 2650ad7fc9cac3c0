//! Reset Session Handler

use hr_trainer::session::SessionEvent;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{errors::session_or_404, responses::SessionResponse},
};

/// Reset Session
///
/// Clears the role, questions and cached intelligence. Work still running for the
/// previous search is discarded when it finishes.
#[endpoint(
    tags("sessions"),
    summary = "Reset Session",
    responses(
        (status_code = StatusCode::OK, description = "Session reset"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let transition = session
        .apply(SessionEvent::Reset)
        .await
        .or_500("failed to reset session")?;

    Ok(Json(SessionResponse::new(session.uuid(), transition.after)))
}
