//! Token records.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{tokens::AccessToken, uuids::TypedUuid};

/// Token Record UUID
pub type TokenRecordUuid = TypedUuid<TokenRecord>;

/// Persisted token status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// Issued and not yet used or revoked.
    Active,

    /// Consumed by a candidate.
    Used,

    /// Withdrawn by an admin.
    Revoked,
}

impl TokenStatus {
    /// Lowercase storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored status value was not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token status `{0}`")]
pub struct UnknownTokenStatus(pub String);

impl FromStr for TokenStatus {
    type Err = UnknownTokenStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "used" => Ok(Self::Used),
            "revoked" => Ok(Self::Revoked),
            other => Err(UnknownTokenStatus(other.to_string())),
        }
    }
}

/// Transition away from [`TokenStatus::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTransition {
    /// `active -> used`
    Consume,

    /// `active -> revoked`
    Revoke,
}

impl TokenTransition {
    /// Status after the transition applies.
    #[must_use]
    pub const fn target(self) -> TokenStatus {
        match self {
            Self::Consume => TokenStatus::Used,
            Self::Revoke => TokenStatus::Revoked,
        }
    }
}

/// Token as persisted by a [`TokenStore`](crate::tokens::TokenStore).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub uuid: TokenRecordUuid,
    pub token: AccessToken,
    pub status: TokenStatus,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl TokenRecord {
    /// Whether the record can still be consumed or revoked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TokenStatus::Active
    }

    /// Apply `transition` at `at` if the record is still active.
    ///
    /// Returns `false` and leaves the record untouched otherwise.
    pub fn apply(&mut self, transition: TokenTransition, at: Timestamp) -> bool {
        if !self.is_active() {
            return false;
        }

        self.status = transition.target();

        match transition {
            TokenTransition::Consume => self.used_at = Some(at),
            TokenTransition::Revoke => self.revoked_at = Some(at),
        }

        true
    }
}

/// New token persistence payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTokenRecord {
    pub uuid: TokenRecordUuid,
    pub token: AccessToken,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<NewTokenRecord> for TokenRecord {
    fn from(record: NewTokenRecord) -> Self {
        Self {
            uuid: record.uuid,
            token: record.token,
            status: TokenStatus::Active,
            created_at: record.created_at,
            expires_at: record.expires_at,
            used_at: None,
            revoked_at: None,
        }
    }
}
