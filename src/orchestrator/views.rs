//! Lazily fetched intelligence and practice flows.

use std::future::Future;

use tracing::info;

use crate::{
    intelligence::{
        AnswerEvaluation, CareerPath, Masterclass, NetworkingIntel, SalaryInsights,
        SimulationReport,
    },
    orchestrator::{Orchestrator, OrchestratorError},
    questions::{InterviewQuestion, QuestionFilter, QuestionId},
    session::{
        CachedIntelligence, SessionEvent, SessionHandle, SessionState, events::MasterclassMap,
    },
    upstream::{RoleQuery, UpstreamError},
};

impl Orchestrator {
    /// Career path for the session's role, cached after the first fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if no search has run or the fetch fails.
    pub async fn career_path(&self, session: &SessionHandle) -> Result<CareerPath, OrchestratorError> {
        self.cached_or_fetch(
            session,
            |state| state.career_path.clone(),
            |role| async move { self.intelligence.career_path(&role).await },
            CachedIntelligence::CareerPath,
        )
        .await
    }

    /// Salary insights for the session's role, cached after the first fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if no search has run or the fetch fails.
    pub async fn salary(&self, session: &SessionHandle) -> Result<SalaryInsights, OrchestratorError> {
        self.cached_or_fetch(
            session,
            |state| state.salary.clone(),
            |role| async move { self.intelligence.salary(&role).await },
            CachedIntelligence::Salary,
        )
        .await
    }

    /// Networking intelligence for the session's role, cached after the first fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if no search has run or the fetch fails.
    pub async fn networking(
        &self,
        session: &SessionHandle,
    ) -> Result<NetworkingIntel, OrchestratorError> {
        self.cached_or_fetch(
            session,
            |state| state.networking.clone(),
            |role| async move { self.intelligence.networking(&role).await },
            CachedIntelligence::Networking,
        )
        .await
    }

    /// Masterclass for one question, from the cache or fetched and merged into it.
    ///
    /// # Errors
    ///
    /// Returns an error if the question is not in the working set or the fetch fails.
    pub async fn masterclass(
        &self,
        session: &SessionHandle,
        question_id: &QuestionId,
    ) -> Result<Masterclass, OrchestratorError> {
        let snapshot = session.snapshot();

        if let Some(masterclass) = snapshot.masterclasses.get(question_id) {
            return Ok(masterclass.clone());
        }

        let question = known_question(&snapshot, question_id)?;
        let masterclass = self
            .intelligence
            .masterclass(&snapshot.role, question)
            .await?;

        let mut merged = MasterclassMap::default();
        merged.insert(question_id.clone(), masterclass.clone());

        session
            .apply(SessionEvent::MasterclassesMerged {
                generation: snapshot.generation,
                masterclasses: merged,
            })
            .await?;

        Ok(masterclass)
    }

    /// Score a written answer and record pass or fail on the question.
    ///
    /// # Errors
    ///
    /// Returns an error if the question is not in the working set or evaluation fails.
    pub async fn evaluate_answer(
        &self,
        session: &SessionHandle,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<AnswerEvaluation, OrchestratorError> {
        let snapshot = session.snapshot();
        let question = known_question(&snapshot, question_id)?;

        let evaluation = self
            .intelligence
            .evaluate_answer(&snapshot.role, question, answer)
            .await?;

        session
            .apply(SessionEvent::QuestionStatusUpdated {
                generation: snapshot.generation,
                question_id: question_id.clone(),
                status: evaluation.status,
            })
            .await?;

        info!(
            session_uuid = %session.uuid(),
            question_id = %question_id,
            score = evaluation.score,
            "answer evaluated"
        );

        Ok(evaluation)
    }

    /// Assess an interview simulation transcript for the session's role.
    ///
    /// # Errors
    ///
    /// Returns an error if no search has run or the assessment fails.
    pub async fn simulation_report(
        &self,
        session: &SessionHandle,
        transcript: &[String],
    ) -> Result<SimulationReport, OrchestratorError> {
        let snapshot = session.snapshot();

        if !snapshot.has_role() {
            return Err(OrchestratorError::NoSearch);
        }

        Ok(self
            .intelligence
            .simulation_report(&snapshot.role, transcript)
            .await?)
    }

    /// Working set questions matching `filter`.
    #[must_use]
    pub fn questions(&self, session: &SessionHandle, filter: &QuestionFilter) -> Vec<InterviewQuestion> {
        let snapshot = session.snapshot();

        filter.apply(&snapshot.questions).into_iter().cloned().collect()
    }

    async fn cached_or_fetch<T, Fetch, Fut>(
        &self,
        session: &SessionHandle,
        cached: impl FnOnce(&SessionState) -> Option<T>,
        fetch: Fetch,
        wrap: fn(T) -> CachedIntelligence,
    ) -> Result<T, OrchestratorError>
    where
        T: Clone,
        Fetch: FnOnce(RoleQuery) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let snapshot = session.snapshot();

        if let Some(bundle) = cached(&snapshot) {
            return Ok(bundle);
        }

        if !snapshot.has_role() {
            return Err(OrchestratorError::NoSearch);
        }

        let bundle = fetch(snapshot.role.clone()).await?;

        session
            .apply(SessionEvent::IntelligenceCached {
                generation: snapshot.generation,
                intelligence: wrap(bundle.clone()),
            })
            .await?;

        Ok(bundle)
    }
}

fn known_question<'a>(
    state: &'a SessionState,
    question_id: &QuestionId,
) -> Result<&'a InterviewQuestion, OrchestratorError> {
    state
        .question(question_id)
        .ok_or_else(|| OrchestratorError::UnknownQuestion(question_id.clone()))
}
