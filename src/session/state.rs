//! Session state.

use serde::Serialize;

use crate::{
    intelligence::{CareerPath, NetworkingIntel, SalaryInsights},
    questions::{InterviewQuestion, QuestionId},
    session::{SearchProgress, SessionError, events::MasterclassMap},
    upstream::RoleQuery,
    uuids::TypedUuid,
};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionState>;

/// Screen the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Search,
    Results,
}

/// Snapshot of one coaching session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Bumped by every search and reset.
    pub generation: u64,
    pub role: RoleQuery,
    pub questions: Vec<InterviewQuestion>,
    pub is_searching: bool,
    pub is_loading_more: bool,
    pub progress: SearchProgress,
    pub error: Option<SessionError>,
    pub view: View,
    pub career_path: Option<CareerPath>,
    pub salary: Option<SalaryInsights>,
    pub networking: Option<NetworkingIntel>,
    pub masterclasses: MasterclassMap,
}

impl SessionState {
    /// Question in the working set with this id.
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&InterviewQuestion> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Whether a search has set a role.
    #[must_use]
    pub fn has_role(&self) -> bool {
        !self.role.job_title.trim().is_empty()
    }

    /// Whether `generation` is the current one.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
