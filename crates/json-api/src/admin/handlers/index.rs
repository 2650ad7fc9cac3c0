//! List Tokens Handler

use salvo::prelude::*;

use crate::{
    admin::{
        errors::into_status_error,
        responses::{TokenResponse, TokensResponse},
    },
    extensions::*,
};

/// List Active Tokens
///
/// Reloads the board from the store. Tokens are shown as previews only.
#[endpoint(
    tags("admin"),
    summary = "List Active Tokens",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active tokens, newest first"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Token store unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TokensResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let tokens = state
        .app
        .board
        .refresh()
        .await
        .map_err(into_status_error)?
        .into_iter()
        .map(TokenResponse::from)
        .collect();

    Ok(Json(TokensResponse { tokens }))
}
