//! Working set filtering.

use serde::Deserialize;

use crate::questions::{InterviewQuestion, QuestionCategory};

/// Text and category filter over a working set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionFilter {
    /// Case-insensitive substring of the question text.
    pub text: Option<String>,

    /// Only this category.
    pub category: Option<QuestionCategory>,
}

impl QuestionFilter {
    #[must_use]
    pub fn matches(&self, question: &InterviewQuestion) -> bool {
        let text_matches = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .is_none_or(|needle| {
                question
                    .question
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            });

        let category_matches = self
            .category
            .is_none_or(|category| category == question.category);

        text_matches && category_matches
    }

    /// Matching questions in working set order.
    #[must_use]
    pub fn apply<'a>(&self, questions: &'a [InterviewQuestion]) -> Vec<&'a InterviewQuestion> {
        questions
            .iter()
            .filter(|question| self.matches(question))
            .collect()
    }
}
