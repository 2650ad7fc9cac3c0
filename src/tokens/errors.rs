//! Token errors.

use std::fmt;

use thiserror::Error;

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Not two non-empty segments, or the payload does not decode.
    #[error("malformed token")]
    Malformed,

    /// The payload expiry is in the past.
    #[error("token expired")]
    Expired,

    /// The signature does not match the payload.
    #[error("token signature mismatch")]
    BadSignature,
}

/// Failure while producing a token.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Payload could not be serialized.
    #[error("failed to serialize token payload")]
    Payload(#[source] serde_json::Error),

    /// Signing key was rejected by the MAC.
    #[error("invalid signing key")]
    Key(#[source] hmac::digest::InvalidLength),
}

/// Token persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be reached or failed transiently.
    #[error("token store unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A record with the same token already exists.
    #[error("token already exists")]
    AlreadyExists,
}

impl StoreError {
    /// Wrap a backend error as [`StoreError::Unavailable`].
    pub fn unavailable(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Box::new(error))
    }
}

/// Token lifecycle failure.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token failed verification. The store was not consulted.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// No record, or the record is no longer active.
    #[error("token not found or already consumed")]
    NotFoundOrConsumed,

    /// Store could not be used. Access is denied.
    #[error("token store unavailable")]
    StoreUnavailable(#[source] StoreError),

    /// Token could not be produced.
    #[error("token signing failed")]
    Signing(#[from] SigningError),
}

impl From<StoreError> for TokenError {
    fn from(error: StoreError) -> Self {
        Self::StoreUnavailable(error)
    }
}

impl TokenError {
    /// Stable classification of this error.
    #[must_use]
    pub fn kind(&self) -> TokenErrorKind {
        match self {
            Self::Verification(VerificationError::Malformed) => TokenErrorKind::MalformedToken,
            Self::Verification(VerificationError::Expired) => TokenErrorKind::ExpiredToken,
            Self::Verification(VerificationError::BadSignature) => TokenErrorKind::BadSignature,
            Self::NotFoundOrConsumed => TokenErrorKind::NotFoundOrConsumed,
            Self::StoreUnavailable(_) | Self::Signing(_) => TokenErrorKind::StoreUnavailable,
        }
    }
}

/// Stable token error codes, used in logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    /// `MALFORMED_TOKEN`
    MalformedToken,

    /// `EXPIRED_TOKEN`
    ExpiredToken,

    /// `BAD_SIGNATURE`
    BadSignature,

    /// `TOKEN_NOT_FOUND_OR_CONSUMED`
    NotFoundOrConsumed,

    /// `STORE_UNAVAILABLE`
    StoreUnavailable,
}

impl TokenErrorKind {
    /// Upper snake case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::BadSignature => "BAD_SIGNATURE",
            Self::NotFoundOrConsumed => "TOKEN_NOT_FOUND_OR_CONSUMED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for TokenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
