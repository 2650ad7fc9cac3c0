//! Close Session Handler

use hr_trainer::session::SessionUuid;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::extensions::*;

/// Close Session
///
/// Forgets the session. Work still running for it is discarded.
#[endpoint(
    tags("sessions"),
    summary = "Close Session",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session closed"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    if !state
        .app
        .sessions
        .close(SessionUuid::from_uuid(session.into_inner()))
        .await
    {
        return Err(StatusError::not_found().brief("Session not found"));
    }

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use crate::test_helpers::{idle_state, service};

    use super::*;

    #[tokio::test]
    async fn closes_once_then_404s() {
        let state = idle_state();
        let session = state.app.sessions.open().await;
        let service = service(
            state.clone(),
            Router::with_path("sessions/{session}").delete(handler),
        );
        let url = format!("http://example.com/sessions/{}", session.uuid());

        let first = TestClient::delete(&url).send(&service).await;
        let second = TestClient::delete(&url).send(&service).await;

        assert_eq!(first.status_code, Some(StatusCode::NO_CONTENT));
        assert_eq!(second.status_code, Some(StatusCode::NOT_FOUND));
        assert!(state.app.sessions.is_empty().await, "registry should be empty");
    }
}
