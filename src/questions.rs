//! Interview questions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod dedup;
pub mod filter;

pub use dedup::{DedupIndex, normalize};
pub use filter::QuestionFilter;

/// Number of questions requested per search or load-more.
pub const BATCH_SIZE: usize = 20;

/// Question identifier, unique within a session's working set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier, for items the source left blank or duplicated.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Question category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    #[serde(rename = "Case Study")]
    CaseStudy,
    Cultural,
}

impl QuestionCategory {
    /// Display label, also the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Behavioral => "Behavioral",
            Self::CaseStudy => "Case Study",
            Self::Cultural => "Cultural",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category label was not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for QuestionCategory {
    type Err = UnknownCategory;

    /// Case-insensitive. Accepts `case study`, `case-study` and `case_study`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "technical" => Ok(Self::Technical),
            "behavioral" | "behavioural" => Ok(Self::Behavioral),
            "casestudy" => Ok(Self::CaseStudy),
            "cultural" => Ok(Self::Cultural),
            _ => Err(UnknownCategory(value.to_string())),
        }
    }
}

/// Outcome of a written practice answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Pass,
    Fail,
}

/// A question in a session's working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: QuestionId,
    pub question: String,
    pub category: QuestionCategory,

    /// Set only by answer evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<QuestionStatus>,
}

impl InterviewQuestion {
    #[must_use]
    pub fn new(
        id: impl Into<QuestionId>,
        question: impl Into<String>,
        category: QuestionCategory,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            category,
            status: None,
        }
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
