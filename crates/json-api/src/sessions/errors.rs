//! Session Errors

use std::sync::Arc;

use hr_trainer::{
    orchestrator::OrchestratorError,
    session::{SessionError, SessionHandle, SessionUuid},
    upstream::UpstreamError,
};
use salvo::http::StatusError;
use tracing::{error, warn};
use uuid::Uuid;

use crate::state::State;

pub(crate) fn into_status_error(error: OrchestratorError) -> StatusError {
    match error {
        OrchestratorError::Upstream(UpstreamError::RateLimited) => {
            StatusError::too_many_requests().brief(SessionError::RateLimited.user_message())
        }
        OrchestratorError::Upstream(source) => {
            warn!(kind = source.kind(), "upstream request failed: {source}");

            StatusError::bad_gateway()
                .brief("The intelligence service could not complete the request. Please try again.")
        }
        OrchestratorError::NoSearch => {
            StatusError::conflict().brief("Run a search before requesting this")
        }
        OrchestratorError::SearchInProgress => {
            StatusError::conflict().brief("A search is still running")
        }
        OrchestratorError::UnknownQuestion(id) => {
            StatusError::not_found().brief(format!("Question {id} is not in this session"))
        }
        OrchestratorError::SessionClosed(source) => {
            error!("session actor stopped: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Live session for `uuid`, or a 404.
pub(crate) async fn session_or_404(
    state: &Arc<State>,
    uuid: Uuid,
) -> Result<SessionHandle, StatusError> {
    state
        .app
        .sessions
        .get(SessionUuid::from_uuid(uuid))
        .await
        .ok_or_else(|| StatusError::not_found().brief("Session not found"))
}
