//! Admin response bodies.

use hr_trainer::tokens::{IssuedToken, TokenRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Active token as listed to admins. Only a preview of the token is shown.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    pub uuid: Uuid,
    pub preview: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<TokenRecord> for TokenResponse {
    fn from(record: TokenRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            preview: record.token.preview(),
            created_at: record.created_at.to_string(),
            expires_at: record.expires_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokensResponse {
    /// Newest first
    pub tokens: Vec<TokenResponse>,
}

/// A newly issued token. The full token is only ever returned here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssuedTokenResponse {
    pub uuid: Uuid,
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<IssuedToken> for IssuedTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            uuid: issued.record.uuid.into_uuid(),
            token: issued.token.into_string(),
            created_at: issued.record.created_at.to_string(),
            expires_at: issued.record.expires_at.to_string(),
        }
    }
}
