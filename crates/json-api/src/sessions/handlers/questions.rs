//! Question Index Handler

use hr_trainer::questions::{QuestionCategory, QuestionFilter};
use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::session_or_404,
        responses::{QuestionResponse, QuestionsResponse},
    },
};

/// List Questions
///
/// Returns the session's questions in working set order, optionally narrowed by a
/// case-insensitive text match and a category.
#[endpoint(
    tags("sessions"),
    summary = "List Questions",
    responses(
        (status_code = StatusCode::OK, description = "Matching questions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<Uuid>,
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<QuestionsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = session_or_404(&state, session.into_inner()).await?;

    let category = category
        .into_inner()
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.parse::<QuestionCategory>())
        .transpose()
        .or_400("category must be Technical, Behavioral, Case Study or Cultural")?;

    let filter = QuestionFilter {
        text: q.into_inner(),
        category,
    };

    let questions = state
        .app
        .orchestrator
        .questions(&session, &filter)
        .into_iter()
        .map(QuestionResponse::from)
        .collect();

    Ok(Json(QuestionsResponse { questions }))
}
