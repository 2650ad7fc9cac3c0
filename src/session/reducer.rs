//! Session reducer.

use tracing::trace;

use crate::{
    questions::DedupIndex,
    session::{
        CachedIntelligence, SearchProgress, SessionEvent, SessionState, View,
        events::Enrichment,
    },
};

/// Apply `event` to `state`.
///
/// Pure: the same state and event always give the same result. Events from a
/// superseded generation leave the state unchanged.
#[must_use]
pub fn reduce(mut state: SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::SearchStarted { role } => {
            state.generation += 1;
            state.role = role;
            state.is_searching = true;
            state.is_loading_more = false;
            state.progress = SearchProgress::started();
            state.error = None;
            state.career_path = None;
            state.salary = None;
            state.networking = None;
            state.masterclasses.clear();
        }

        SessionEvent::Reset => {
            state = SessionState {
                generation: state.generation + 1,
                ..SessionState::default()
            };
        }

        event => {
            let Some(generation) = generation_of(&event) else {
                return state;
            };

            if !state.is_current(generation) {
                trace!(
                    generation,
                    current = state.generation,
                    "dropping event from superseded generation"
                );

                return state;
            }

            apply_current(&mut state, event);
        }
    }

    state
}

fn generation_of(event: &SessionEvent) -> Option<u64> {
    match event {
        SessionEvent::SearchStarted { .. } | SessionEvent::Reset => None,
        SessionEvent::QuestionsFetched { generation }
        | SessionEvent::EnrichmentStepCompleted { generation, .. }
        | SessionEvent::SearchCompleted { generation, .. }
        | SessionEvent::ResultsShown { generation }
        | SessionEvent::SearchFailed { generation, .. }
        | SessionEvent::LoadMoreStarted { generation }
        | SessionEvent::LoadMoreCompleted { generation, .. }
        | SessionEvent::LoadMoreFailed { generation, .. }
        | SessionEvent::MasterclassesMerged { generation, .. }
        | SessionEvent::IntelligenceCached { generation, .. }
        | SessionEvent::QuestionStatusUpdated { generation, .. } => Some(*generation),
    }
}

fn apply_current(state: &mut SessionState, event: SessionEvent) {
    match event {
        SessionEvent::QuestionsFetched { .. } => state.progress.questions_fetched(),

        SessionEvent::EnrichmentStepCompleted { step, .. } => state.progress.step_completed(step),

        SessionEvent::SearchCompleted {
            questions,
            enrichment:
                Enrichment {
                    career_path,
                    salary,
                    networking,
                    masterclasses,
                },
            ..
        } => {
            state.questions = DedupIndex::default().admit_all(questions);
            state.is_searching = false;
            state.progress.complete();
            state.career_path = career_path;
            state.salary = salary;
            state.networking = networking;
            state.masterclasses = masterclasses;
        }

        SessionEvent::ResultsShown { .. } => state.view = View::Results,

        SessionEvent::SearchFailed { error, .. } => {
            state.is_searching = false;
            state.error = Some(error);
            state.view = if state.questions.is_empty() {
                View::Search
            } else {
                View::Results
            };
        }

        SessionEvent::LoadMoreStarted { .. } => {
            state.is_loading_more = true;
            state.error = None;
        }

        SessionEvent::LoadMoreCompleted { questions, .. } => {
            let accepted = DedupIndex::from_questions(&state.questions).admit_all(questions);

            state.questions.extend(accepted);
            state.is_loading_more = false;
        }

        SessionEvent::LoadMoreFailed { error, .. } => {
            state.is_loading_more = false;
            state.error = Some(error);
        }

        SessionEvent::MasterclassesMerged { masterclasses, .. } => {
            state.masterclasses.extend(masterclasses);
        }

        SessionEvent::IntelligenceCached { intelligence, .. } => match intelligence {
            CachedIntelligence::CareerPath(path) => state.career_path = Some(path),
            CachedIntelligence::Salary(salary) => state.salary = Some(salary),
            CachedIntelligence::Networking(networking) => state.networking = Some(networking),
        },

        SessionEvent::QuestionStatusUpdated {
            question_id,
            status,
            ..
        } => {
            if let Some(question) = state
                .questions
                .iter_mut()
                .find(|question| question.id == question_id)
            {
                question.status = Some(status);
            }
        }

        SessionEvent::SearchStarted { .. } | SessionEvent::Reset => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        intelligence::{Masterclass, SalaryBands, SalaryInsights},
        questions::{InterviewQuestion, QuestionCategory, QuestionId, QuestionStatus},
        session::{EnrichmentStep, SessionError, events::MasterclassMap},
        upstream::RoleQuery,
    };

    fn role() -> RoleQuery {
        RoleQuery::new("Platform Engineer", "Berlin")
    }

    fn question(id: &str, text: &str) -> InterviewQuestion {
        InterviewQuestion::new(id, text, QuestionCategory::Technical)
    }

    fn masterclass(concept: &str) -> Masterclass {
        Masterclass {
            core_concept: concept.to_string(),
            why: "it matters".to_string(),
            technical_points: Vec::new(),
            insider_tip: String::new(),
            red_flags: Vec::new(),
        }
    }

    fn salary() -> SalaryInsights {
        SalaryInsights {
            bands: SalaryBands {
                min: "€70k".to_string(),
                median: "€85k".to_string(),
                max: "€110k".to_string(),
            },
            bonus_structure: String::new(),
            col_adjustment: String::new(),
            equity_insights: String::new(),
        }
    }

    fn searched(questions: Vec<InterviewQuestion>) -> SessionState {
        let state = reduce(SessionState::default(), SessionEvent::SearchStarted { role: role() });
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::SearchCompleted {
                generation,
                questions,
                enrichment: Enrichment::default(),
            },
        );

        reduce(state, SessionEvent::ResultsShown { generation })
    }

    #[test]
    fn search_start_clears_bundles_but_keeps_questions() {
        let mut state = searched(vec![question("1", "Explain Raft")]);
        state.salary = Some(salary());
        state.masterclasses.insert(QuestionId::from("1"), masterclass("consensus"));

        let state = reduce(state, SessionEvent::SearchStarted { role: role() });

        assert_eq!(state.generation, 2);
        assert!(state.is_searching, "search should be running");
        assert_eq!(state.progress.percent, 10);
        assert_eq!(state.salary, None);
        assert!(state.masterclasses.is_empty(), "cache should be cleared");
        assert_eq!(state.questions.len(), 1);
    }

    #[test]
    fn enrichment_steps_advance_progress_one_at_a_time() {
        let state = reduce(SessionState::default(), SessionEvent::SearchStarted { role: role() });
        let generation = state.generation;

        let mut state = reduce(state, SessionEvent::QuestionsFetched { generation });
        let mut percents = vec![state.progress.percent];

        for step in [
            EnrichmentStep::Salary,
            EnrichmentStep::CareerPath,
            EnrichmentStep::Masterclasses,
            EnrichmentStep::Networking,
        ] {
            state = reduce(state, SessionEvent::EnrichmentStepCompleted { generation, step });
            percents.push(state.progress.percent);
        }

        assert_eq!(percents, vec![30, 47, 65, 82, 95]);
        assert_eq!(state.progress.stage, EnrichmentStep::Networking.stage());
    }

    #[test]
    fn completion_shows_results_only_after_results_shown() {
        let state = reduce(SessionState::default(), SessionEvent::SearchStarted { role: role() });
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::SearchCompleted {
                generation,
                questions: vec![question("1", "Q1")],
                enrichment: Enrichment::default(),
            },
        );

        assert_eq!(state.progress.percent, 100);
        assert!(!state.is_searching, "search should be finished");
        assert_eq!(state.view, View::Search);

        let state = reduce(state, SessionEvent::ResultsShown { generation });

        assert_eq!(state.view, View::Results);
    }

    #[test]
    fn events_from_a_superseded_generation_are_ignored() {
        let first = reduce(SessionState::default(), SessionEvent::SearchStarted { role: role() });
        let stale_generation = first.generation;
        let second = reduce(first, SessionEvent::SearchStarted { role: role() });

        let after = reduce(
            second.clone(),
            SessionEvent::SearchCompleted {
                generation: stale_generation,
                questions: vec![question("1", "stale")],
                enrichment: Enrichment::default(),
            },
        );

        assert_eq!(after, second);
    }

    #[test]
    fn failure_without_questions_returns_to_search() {
        let state = reduce(SessionState::default(), SessionEvent::SearchStarted { role: role() });
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::SearchFailed {
                generation,
                error: SessionError::RateLimited,
            },
        );

        assert_eq!(state.view, View::Search);
        assert_eq!(state.error, Some(SessionError::RateLimited));
        assert!(!state.is_searching, "search should be over");
    }

    #[test]
    fn failure_with_questions_stays_on_results() {
        let state = searched(vec![question("1", "Q1")]);
        let state = reduce(state, SessionEvent::SearchStarted { role: role() });
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::SearchFailed {
                generation,
                error: SessionError::SearchFailed,
            },
        );

        assert_eq!(state.view, View::Results);
    }

    #[test]
    fn load_more_appends_only_new_questions_in_order() {
        let state = searched(vec![question("1", "Explain Raft"), question("2", "Explain Paxos")]);
        let generation = state.generation;

        let state = reduce(state, SessionEvent::LoadMoreStarted { generation });
        assert!(state.is_loading_more, "load more should be running");

        let state = reduce(
            state,
            SessionEvent::LoadMoreCompleted {
                generation,
                questions: vec![
                    question("3", "explain raft "),
                    question("4", "Explain gossip"),
                    question("5", "EXPLAIN GOSSIP"),
                    question("6", "Explain CRDTs"),
                ],
            },
        );

        let ids: Vec<_> = state.questions.iter().map(|q| q.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "4", "6"]);
        assert!(!state.is_loading_more, "load more should be finished");
    }

    #[test]
    fn masterclasses_merge_instead_of_replacing() {
        let mut state = searched(vec![question("1", "A"), question("2", "B")]);
        let generation = state.generation;
        state.masterclasses.insert(QuestionId::from("1"), masterclass("first"));

        let mut incoming = MasterclassMap::default();
        incoming.insert(QuestionId::from("2"), masterclass("second"));

        let state = reduce(
            state,
            SessionEvent::MasterclassesMerged {
                generation,
                masterclasses: incoming,
            },
        );

        assert_eq!(state.masterclasses.len(), 2);
    }

    #[test]
    fn question_status_is_recorded() {
        let state = searched(vec![question("1", "A")]);
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::QuestionStatusUpdated {
                generation,
                question_id: QuestionId::from("1"),
                status: QuestionStatus::Pass,
            },
        );

        assert_eq!(
            state.questions.first().and_then(|q| q.status),
            Some(QuestionStatus::Pass)
        );
    }

    #[test]
    fn reset_clears_everything_and_bumps_the_generation() {
        let mut state = searched(vec![question("1", "A")]);
        state.salary = Some(salary());

        let state = reduce(state, SessionEvent::Reset);

        assert_eq!(
            state,
            SessionState {
                generation: 2,
                ..SessionState::default()
            }
        );
    }

    #[test]
    fn lazily_fetched_salary_is_cached() {
        let state = searched(vec![question("1", "A")]);
        let generation = state.generation;

        let state = reduce(
            state,
            SessionEvent::IntelligenceCached {
                generation,
                intelligence: CachedIntelligence::Salary(salary()),
            },
        );

        assert_eq!(state.salary, Some(salary()));
    }
}
