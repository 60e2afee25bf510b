use crate::AppConfig;
use crate::routes::api::v0::question::error::QuestionError;
use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use delfos_core::select::select_question_ids;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub(crate) mod error;

/// How many questions a round hands out when the client does not say.
const DEFAULT_DRAW: usize = 8;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/select", get(select_questions))
        .route("/{id}", get(get_question))
        .route("/{id}/answer", get(get_answer))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectParams {
    pub profile: String,
    pub count: Option<usize>,
}

#[derive(Serialize, Debug, ToSchema)]
pub(crate) struct SelectResponse {
    profile: String,
    question_ids: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/v0/questions/select",
    params(
        ("profile" = String, Query, description = "profile to draw from"),
        ("count" = Option<usize>, Query, description = "how many distinct questions to draw, defaults to 8"),
    ),
    responses(
        (status = OK, body = SelectResponse, description = "Distinct question ids drawn uniformly from the profile"),
        (status = NOT_FOUND, description = "Unknown profile"),
        (status = BAD_REQUEST, description = "Count is zero or exceeds the profile size"),
    ),
    tag = "v0/questions"
)]
pub(crate) async fn select_questions(
    Extension(app_config): Extension<AppConfig>,
    Query(params): Query<SelectParams>,
) -> Result<Response, QuestionError> {
    let profile = app_config
        .bank()
        .profile(&params.profile)
        .ok_or_else(|| QuestionError::ProfileNotFound(params.profile.clone()))?;
    let count = params.count.unwrap_or(DEFAULT_DRAW);
    let question_ids = select_question_ids(profile, count, &mut rand::thread_rng())?;
    tracing::debug!(profile = profile.name, count, "drew question ids");
    Ok(Json(SelectResponse {
        profile: profile.name.clone(),
        question_ids,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/questions/{id}",
    params(
        ("id" = String, Path, description = "question id"),
    ),
    responses(
        (status = OK, body = delfos_model::question::Question, description = "The question text and its options"),
        (status = NOT_FOUND, description = "Unknown question id"),
    ),
    tag = "v0/questions"
)]
pub(crate) async fn get_question(
    Extension(app_config): Extension<AppConfig>,
    Path(id): Path<String>,
) -> Result<Response, QuestionError> {
    let question = app_config
        .bank()
        .lookup_question(&id)
        .ok_or(QuestionError::QuestionNotFound(id))?;
    Ok(Json(question.clone()).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/questions/{id}/answer",
    params(
        ("id" = String, Path, description = "question id"),
    ),
    responses(
        (status = OK, body = delfos_model::question::AnswerKey, description = "The correct option and its explanation"),
        (status = NOT_FOUND, description = "Unknown question id"),
    ),
    tag = "v0/questions"
)]
pub(crate) async fn get_answer(
    Extension(app_config): Extension<AppConfig>,
    Path(id): Path<String>,
) -> Result<Response, QuestionError> {
    let answer = app_config
        .bank()
        .lookup_answer(&id)
        .ok_or(QuestionError::QuestionNotFound(id))?;
    Ok(Json(answer.clone()).into_response())
}
