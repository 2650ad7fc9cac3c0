//! Issue Token Handler

use hr_trainer::tokens::TokenTtl;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    admin::{errors::into_status_error, responses::IssuedTokenResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTokenRequest {
    /// One of 1, 6, 12, 24, 72 or 168
    pub ttl_hours: u32,
}

/// Issue Token
#[endpoint(
    tags("admin"),
    summary = "Issue Token",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unsupported lifetime"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Token store unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTokenRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IssuedTokenResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let ttl = TokenTtl::try_from(json.into_inner().ttl_hours)
        .or_400("ttl_hours must be one of 1, 6, 12, 24, 72 or 168")?;

    let issued = state.app.board.issue(ttl).await.map_err(into_status_error)?;

    info!(token_uuid = %issued.record.uuid, ttl_hours = ttl.hours(), "token issued");

    res.add_header(LOCATION, format!("/admin/tokens/{}", issued.record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}
