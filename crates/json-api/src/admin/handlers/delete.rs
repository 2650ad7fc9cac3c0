//! Revoke Token Handler

use hr_trainer::tokens::TokenRecordUuid;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{admin::errors::into_status_error, extensions::*};

/// Revoke Token
///
/// Only active tokens can be revoked. Used, expired or unknown tokens answer 404.
#[endpoint(
    tags("admin"),
    summary = "Revoke Token",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
        (status_code = StatusCode::NOT_FOUND, description = "No active token with that UUID"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Token store unavailable"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let uuid = TokenRecordUuid::from_uuid(token.into_inner());

    if !state.app.board.revoke(uuid).await.map_err(into_status_error)? {
        return Err(StatusError::not_found().brief("No active token with that UUID"));
    }

    info!(token_uuid = %uuid, "token revoked");

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
