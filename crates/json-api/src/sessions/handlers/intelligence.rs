//! Role Intelligence Handlers
//!
//! Each bundle is served from the session's cache when a search or an earlier request
//! already produced it.

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::{into_status_error, session_or_404},
        responses::{CareerPathResponse, NetworkingResponse, SalaryResponse},
    },
};

/// Get Career Path
#[endpoint(
    tags("intelligence"),
    summary = "Get Career Path",
    responses(
        (status_code = StatusCode::OK, description = "Career path"),
        (status_code = StatusCode::CONFLICT, description = "No search yet"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
    ),
)]
pub(crate) async fn career_path(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CareerPathResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let bundle = state
        .app
        .orchestrator
        .career_path(&session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CareerPathResponse { career_path: bundle }))
}

/// Get Salary Insights
#[endpoint(
    tags("intelligence"),
    summary = "Get Salary Insights",
    responses(
        (status_code = StatusCode::OK, description = "Salary insights"),
        (status_code = StatusCode::CONFLICT, description = "No search yet"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
    ),
)]
pub(crate) async fn salary(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SalaryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let bundle = state
        .app
        .orchestrator
        .salary(&session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SalaryResponse { salary: bundle }))
}

/// Get Networking Intelligence
#[endpoint(
    tags("intelligence"),
    summary = "Get Networking Intelligence",
    responses(
        (status_code = StatusCode::OK, description = "Networking intelligence"),
        (status_code = StatusCode::CONFLICT, description = "No search yet"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Upstream quota exhausted"),
    ),
)]
pub(crate) async fn networking(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<NetworkingResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let bundle = state
        .app
        .orchestrator
        .networking(&session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(NetworkingResponse { networking: bundle }))
}
