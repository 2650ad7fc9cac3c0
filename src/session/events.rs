//! Session events.

use rustc_hash::FxHashMap;

use crate::{
    intelligence::{CareerPath, Masterclass, NetworkingIntel, SalaryInsights},
    questions::{InterviewQuestion, QuestionId, QuestionStatus},
    session::SessionError,
    upstream::RoleQuery,
};

/// Masterclasses keyed by question.
pub type MasterclassMap = FxHashMap<QuestionId, Masterclass>;

/// Parallel enrichment branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrichmentStep {
    CareerPath,
    Salary,
    Networking,
    Masterclasses,
}

impl EnrichmentStep {
    /// Progress label shown once this step finishes.
    #[must_use]
    pub const fn stage(self) -> &'static str {
        match self {
            Self::CareerPath => "Career roadmap mapped",
            Self::Salary => "Compensation data collected",
            Self::Networking => "Local networks located",
            Self::Masterclasses => "Question briefings compiled",
        }
    }

    /// Where this step looks, for the progress annotation.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::CareerPath => "Labour market trends, job postings",
            Self::Salary => "Salary surveys, cost of living indices",
            Self::Networking => "Meetup listings, event calendars",
            Self::Masterclasses => "Coaching playbooks, case libraries",
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CareerPath => "career_path",
            Self::Salary => "salary",
            Self::Networking => "networking",
            Self::Masterclasses => "masterclasses",
        }
    }
}

/// Everything a completed search gathered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub career_path: Option<CareerPath>,
    pub salary: Option<SalaryInsights>,
    pub networking: Option<NetworkingIntel>,
    pub masterclasses: MasterclassMap,
}

/// A lazily fetched bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedIntelligence {
    CareerPath(CareerPath),
    Salary(SalaryInsights),
    Networking(NetworkingIntel),
}

/// Input to [`reduce`](crate::session::reduce).
///
/// Events carrying a `generation` are dropped unless it matches the session's current
/// one.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Starts a new generation.
    SearchStarted { role: RoleQuery },

    QuestionsFetched { generation: u64 },

    EnrichmentStepCompleted { generation: u64, step: EnrichmentStep },

    /// Replaces the working set and bundles.
    SearchCompleted {
        generation: u64,
        questions: Vec<InterviewQuestion>,
        enrichment: Enrichment,
    },

    ResultsShown { generation: u64 },

    SearchFailed { generation: u64, error: SessionError },

    LoadMoreStarted { generation: u64 },

    /// Appends the items not already in the working set.
    LoadMoreCompleted {
        generation: u64,
        questions: Vec<InterviewQuestion>,
    },

    LoadMoreFailed { generation: u64, error: SessionError },

    /// Adds to the masterclass cache without dropping existing entries.
    MasterclassesMerged {
        generation: u64,
        masterclasses: MasterclassMap,
    },

    IntelligenceCached {
        generation: u64,
        intelligence: CachedIntelligence,
    },

    QuestionStatusUpdated {
        generation: u64,
        question_id: QuestionId,
        status: QuestionStatus,
    },

    /// Clears everything and starts a new generation.
    Reset,
}
