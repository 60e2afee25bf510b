use crate::AppConfig;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use delfos_core::evaluate::{EvaluateError, evaluate};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", post(evaluate_answers))
}

#[derive(Error, Debug)]
pub(crate) enum EvaluationError {
    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
}

impl IntoResponse for EvaluationError {
    fn into_response(self) -> Response {
        let Self::Evaluate(_) = self;
        http::StatusCode::BAD_REQUEST.into_response()
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub(crate) struct EvaluationRequest {
    question_ids: Vec<String>,
    user_answers: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/v0/evaluations",
    request_body = EvaluationRequest,
    responses(
        (status = OK, body = delfos_model::evaluation::Evaluation, description = "Per-question grades and the aggregate score"),
        (status = BAD_REQUEST, description = "Empty or misaligned submission"),
    ),
    tag = "v0/evaluations"
)]
pub(crate) async fn evaluate_answers(
    Extension(app_config): Extension<AppConfig>,
    Json(payload): Json<EvaluationRequest>,
) -> Result<Response, EvaluationError> {
    let evaluation = evaluate(app_config.bank(), &payload.question_ids, &payload.user_answers)?;
    tracing::debug!(
        total = evaluation.total_questions,
        correct = evaluation.correct_answers,
        "graded submission"
    );
    Ok(Json(evaluation).into_response())
}
