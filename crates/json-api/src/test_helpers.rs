//! Test helpers.

use std::{sync::Arc, time::Duration};

use hr_trainer::{
    orchestrator::{Orchestrator, OrchestratorSettings},
    questions::{InterviewQuestion, QuestionCategory},
    session::{Enrichment, SessionEvent, SessionHandle},
    tokens::{ActiveTokenBoard, MockTokenService, TokenService},
    upstream::{MockIntelligenceSource, MockQuestionSource, RoleQuery},
};
use hr_trainer_app::{context::AppContext, sessions::SessionRegistry};
use salvo::{affix_state::inject, prelude::*};

use crate::{config::auth::AdminSecret, state::State};

pub(crate) const TEST_ADMIN_SECRET: &str = "test-admin-secret";

/// Orchestration without the cosmetic pauses.
pub(crate) fn instant_settings() -> OrchestratorSettings {
    OrchestratorSettings {
        completion_delay: Duration::ZERO,
        settle_delay: Duration::ZERO,
        ..OrchestratorSettings::default()
    }
}

/// State over mocks. A mock with no expectations fails the test if it is called.
pub(crate) fn state_with(
    tokens: MockTokenService,
    questions: MockQuestionSource,
    intelligence: MockIntelligenceSource,
) -> Arc<State> {
    let tokens: Arc<dyn TokenService> = Arc::new(tokens);

    let app = AppContext {
        board: Arc::new(ActiveTokenBoard::new(Arc::clone(&tokens))),
        tokens,
        orchestrator: Orchestrator::new(
            Arc::new(questions),
            Arc::new(intelligence),
            instant_settings(),
        ),
        sessions: Arc::new(SessionRegistry::default()),
    };

    State::new(app, AdminSecret::new(TEST_ADMIN_SECRET))
}

pub(crate) fn state_with_tokens(tokens: MockTokenService) -> Arc<State> {
    state_with(
        tokens,
        MockQuestionSource::new(),
        MockIntelligenceSource::new(),
    )
}

pub(crate) fn state_with_sources(
    questions: MockQuestionSource,
    intelligence: MockIntelligenceSource,
) -> Arc<State> {
    state_with(MockTokenService::new(), questions, intelligence)
}

/// State whose collaborators must not be called.
pub(crate) fn idle_state() -> Arc<State> {
    state_with_tokens(MockTokenService::new())
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn role() -> RoleQuery {
    RoleQuery::new("Backend Engineer", "Berlin")
}

pub(crate) fn question(id: &str, text: &str) -> InterviewQuestion {
    InterviewQuestion::new(id, text, QuestionCategory::Technical)
}

/// Open a session whose search has already completed with `questions`.
pub(crate) async fn searched_session(
    state: &State,
    questions: Vec<InterviewQuestion>,
) -> SessionHandle {
    let session = state.app.sessions.open().await;

    let generation = session
        .apply(SessionEvent::SearchStarted { role: role() })
        .await
        .map(|transition| transition.after.generation)
        .unwrap_or_default();

    for event in [
        SessionEvent::SearchCompleted {
            generation,
            questions,
            enrichment: Enrichment::default(),
        },
        SessionEvent::ResultsShown { generation },
    ] {
        let _applied = session.apply(event).await;
    }

    session
}
