//! Question de-duplication.

use rustc_hash::FxHashSet;

use crate::questions::{InterviewQuestion, QuestionId};

/// Text key two questions are compared by: trimmed and lower-cased.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized texts and ids already present in a working set.
#[derive(Debug, Default, Clone)]
pub struct DedupIndex {
    texts: FxHashSet<String>,
    ids: FxHashSet<QuestionId>,
}

impl DedupIndex {
    /// Index an existing working set.
    #[must_use]
    pub fn from_questions(questions: &[InterviewQuestion]) -> Self {
        let mut index = Self::default();

        for question in questions {
            index.texts.insert(normalize(&question.question));
            index.ids.insert(question.id.clone());
        }

        index
    }

    /// Whether a question with the same normalized text is indexed.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(&normalize(text))
    }

    /// Accept `question` unless its text is already indexed.
    ///
    /// A blank or already used id is replaced so ids stay unique.
    pub fn admit(&mut self, mut question: InterviewQuestion) -> Option<InterviewQuestion> {
        if !self.texts.insert(normalize(&question.question)) {
            return None;
        }

        if question.id.as_str().trim().is_empty() || self.ids.contains(&question.id) {
            question.id = QuestionId::random();
        }

        self.ids.insert(question.id.clone());

        Some(question)
    }

    /// Filter `incoming` against the index and against itself, keeping received order.
    pub fn admit_all(&mut self, incoming: Vec<InterviewQuestion>) -> Vec<InterviewQuestion> {
        incoming
            .into_iter()
            .filter_map(|question| self.admit(question))
            .collect()
    }
}
