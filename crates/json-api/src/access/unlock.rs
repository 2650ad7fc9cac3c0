//! Unlock Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{extensions::*, observability::observe_token_verification};

const UNLOCKED: &str = "UNLOCKED";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UnlockRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UnlockResponse {
    pub unlocked: bool,

    /// Session opened by a successful unlock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Uuid>,
}

/// Unlock Access
///
/// Verifies and consumes a single-use access token. Every failure reads as
/// `unlocked: false`; the reason is only logged.
#[endpoint(
    tags("access"),
    summary = "Unlock Access",
    responses(
        (status_code = StatusCode::OK, description = "Unlock outcome"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UnlockRequest>,
    depot: &mut Depot,
) -> Result<Json<UnlockResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let token = json.into_inner().token;

    match state.app.tokens.verify_and_consume(token.trim()).await {
        Ok(record) => {
            observe_token_verification(UNLOCKED);

            let session = state.app.sessions.open().await;

            info!(token_uuid = %record.uuid, session_uuid = %session.uuid(), "access unlocked");

            Ok(Json(UnlockResponse {
                unlocked: true,
                session: Some(session.uuid().into_uuid()),
            }))
        }
        Err(error) => {
            let kind = error.kind();

            observe_token_verification(kind.as_str());
            warn!(%kind, "access denied: {error}");

            Ok(Json(UnlockResponse {
                unlocked: false,
                session: None,
            }))
        }
    }
}
