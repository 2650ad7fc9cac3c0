//! Session errors.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failure shown to the user on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SessionError {
    /// Quota exhausted upstream.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Search could not complete.
    #[error("search failed")]
    SearchFailed,

    /// More questions could not be fetched.
    #[error("load more failed")]
    LoadMoreFailed,
}

impl SessionError {
    /// Classify a search failure.
    #[must_use]
    pub fn from_search(error: &UpstreamError) -> Self {
        match error {
            UpstreamError::RateLimited => Self::RateLimited,
            UpstreamError::Failure(_) | UpstreamError::InvalidResponse(_) => Self::SearchFailed,
        }
    }

    /// Classify a load-more failure.
    #[must_use]
    pub fn from_load_more(error: &UpstreamError) -> Self {
        match error {
            UpstreamError::RateLimited => Self::RateLimited,
            UpstreamError::Failure(_) | UpstreamError::InvalidResponse(_) => Self::LoadMoreFailed,
        }
    }

    /// Stable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RateLimited => "RATE_LIMIT_EXCEEDED",
            Self::SearchFailed | Self::LoadMoreFailed => "UPSTREAM_FAILURE",
        }
    }

    /// Message shown to the user.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::RateLimited => {
                "The shared AI quota is used up. Try again later or configure your own API key."
            }
            Self::SearchFailed => "The search could not be completed. Please try again.",
            Self::LoadMoreFailed => "Could not load more questions. Please try again.",
        }
    }
}

impl Serialize for SessionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", self.user_message())?;
        state.end()
    }
}

/// The session actor has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session closed")]
pub struct SessionClosed;

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rate_limit_gets_its_own_message() {
        let search = SessionError::from_search(&UpstreamError::RateLimited);
        let failure = SessionError::from_search(&UpstreamError::Failure("boom".to_string()));

        assert_eq!(search, SessionError::RateLimited);
        assert_ne!(search.user_message(), failure.user_message());
    }

    #[test]
    fn load_more_failures_are_classified_separately() {
        assert_eq!(
            SessionError::from_load_more(&UpstreamError::Failure("x".to_string())),
            SessionError::LoadMoreFailed
        );
    }

    #[test]
    fn serializes_code_and_message() -> TestResult {
        let json = serde_json::to_value(SessionError::RateLimited)?;

        assert_eq!(
            json.get("code").and_then(|code| code.as_str()),
            Some("RATE_LIMIT_EXCEEDED")
        );
        assert!(
            json.get("message").is_some_and(serde_json::Value::is_string),
            "message missing: {json}"
        );

        Ok(())
    }
}
