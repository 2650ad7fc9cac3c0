//! HR Trainer prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    clock::{Clock, ManualClock, SystemClock},
    intelligence::{
        AnswerEvaluation, CareerPath, Masterclass, NetworkingIntel, SalaryInsights, SchemaError,
        SimulationReport, Validate, decode_bundle, decode_questions,
    },
    orchestrator::{
        EnrichmentPolicy, LoadMoreOutcome, Orchestrator, OrchestratorError, OrchestratorSettings,
    },
    questions::{
        InterviewQuestion, QuestionCategory, QuestionFilter, QuestionId, QuestionStatus,
    },
    session::{
        SessionError, SessionEvent, SessionHandle, SessionState, SessionUuid, View, reduce,
    },
    tokens::{
        AccessGate, AccessToken, ActiveTokenBoard, GateState, InMemoryTokenStore, IssuedToken,
        StoreError, TokenError, TokenErrorKind, TokenLifecycle, TokenRecord, TokenRecordUuid,
        TokenSecret, TokenService, TokenStatus, TokenStore, TokenTtl, VerificationError, unlock,
    },
    upstream::{
        IntelligenceSource, QuestionQuery, QuestionSource, RoleQuery, UpstreamError,
    },
    uuids::TypedUuid,
};
