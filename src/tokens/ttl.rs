//! Token lifetimes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Lifetime an issuer may choose for a new token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TokenTtl {
    /// 1 hour
    OneHour,

    /// 6 hours
    SixHours,

    /// 12 hours
    TwelveHours,

    /// 24 hours
    #[default]
    OneDay,

    /// 72 hours
    ThreeDays,

    /// 168 hours
    OneWeek,
}

impl TokenTtl {
    /// Every supported lifetime, shortest first.
    pub const ALL: [Self; 6] = [
        Self::OneHour,
        Self::SixHours,
        Self::TwelveHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
    ];

    /// Lifetime in hours.
    #[must_use]
    pub const fn hours(self) -> u32 {
        match self {
            Self::OneHour => 1,
            Self::SixHours => 6,
            Self::TwelveHours => 12,
            Self::OneDay => 24,
            Self::ThreeDays => 72,
            Self::OneWeek => 168,
        }
    }

    /// Lifetime in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        i64::from(self.hours()) * MILLIS_PER_HOUR
    }

    /// Lifetime as a standard duration.
    #[must_use]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.hours()) * 3_600)
    }
}

/// Requested lifetime is not one of [`TokenTtl::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported token lifetime of {0} hours")]
pub struct UnsupportedTtl(pub u32);

impl TryFrom<u32> for TokenTtl {
    type Error = UnsupportedTtl;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|ttl| ttl.hours() == hours)
            .ok_or(UnsupportedTtl(hours))
    }
}

impl From<TokenTtl> for u32 {
    fn from(ttl: TokenTtl) -> Self {
        ttl.hours()
    }
}

impl fmt::Display for TokenTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours())
    }
}
