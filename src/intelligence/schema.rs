//! Validated decoding of collaborator output.
//!
//! Everything an intelligence source returns is parsed and cleaned here. Callers only
//! ever see bundles that passed [`Validate`].

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::questions::{InterviewQuestion, QuestionCategory, QuestionId};

/// Collaborator output did not match the expected shape.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Not JSON, or not the expected JSON structure.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    /// A required field was missing or blank.
    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),

    /// A numeric field was outside its allowed range.
    #[error("field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Post-parse cleaning and invariant checks.
pub trait Validate: Sized {
    /// Normalize the value or reject it.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is blank or a value is out of range.
    fn validate(self) -> Result<Self, SchemaError>;
}

/// Parse and validate a JSON bundle.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON for `T` or fails validation.
pub fn decode_bundle<T>(text: &str) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Validate,
{
    serde_json::from_str::<T>(text)?.validate()
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<Value>,
    question: String,
    category: String,
}

impl RawQuestion {
    fn into_question(self) -> Option<InterviewQuestion> {
        let question = self.question.trim();

        if question.is_empty() {
            return None;
        }

        let category = self.category.parse::<QuestionCategory>().ok()?;

        let id = match self.id {
            Some(Value::String(id)) => QuestionId::new(id.trim()),
            Some(Value::Number(id)) => QuestionId::new(id.to_string()),
            _ => QuestionId::new(""),
        };

        Some(InterviewQuestion::new(id, question, category))
    }
}

/// Parse a JSON array of questions, dropping malformed items.
///
/// Items keep their order. Blank ids are left blank for the working set to assign.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array.
pub fn decode_questions(text: &str) -> Result<Vec<InterviewQuestion>, SchemaError> {
    let items: Vec<Value> = serde_json::from_str(text)?;
    let received = items.len();

    let questions: Vec<_> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawQuestion>(item).ok())
        .filter_map(RawQuestion::into_question)
        .collect();

    if questions.len() < received {
        debug!(
            received,
            kept = questions.len(),
            "dropped malformed question items"
        );
    }

    Ok(questions)
}

/// Trim `value`, rejecting it if nothing is left.
pub(crate) fn require_text(field: &'static str, value: String) -> Result<String, SchemaError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(SchemaError::MissingField(field));
    }

    Ok(trimmed.to_string())
}

/// Trim every entry and drop the blank ones.
pub(crate) fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
