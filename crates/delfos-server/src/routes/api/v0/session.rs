use crate::routes::api::v0::session::error::SessionError;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use delfos_core::store::SessionStore;
use delfos_model::session::Submission;
use http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(create_session))
        .route("/submissions", post(append_submission))
}

#[derive(Deserialize, Debug, ToSchema)]
pub(crate) struct CreateSessionRequest {
    user_email: String,
    session_id: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = CREATED, body = delfos_model::session::Session, description = "Created a fresh session record"),
        (status = CONFLICT, description = "A record for this participant and session already exists"),
        (status = BAD_REQUEST, description = "Email or session id cannot form a record key"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn create_session(
    Extension(store): Extension<SessionStore>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Response, SessionError> {
    let session = store
        .create(&payload.user_email, &payload.session_id)
        .await?;
    tracing::info!(
        user_email = session.user_email,
        session_id = session.session_id,
        "session created"
    );
    Ok((StatusCode::CREATED, Json(session)).into_response())
}

#[derive(Deserialize, Debug, ToSchema)]
pub(crate) struct AppendSubmissionRequest {
    user_email: String,
    session_id: String,
    question_ids: Vec<String>,
    answers: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions/submissions",
    request_body = AppendSubmissionRequest,
    responses(
        (status = NO_CONTENT, description = "Submission appended to the session record"),
        (status = NOT_FOUND, description = "No record for this participant and session"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn append_submission(
    Extension(store): Extension<SessionStore>,
    Json(payload): Json<AppendSubmissionRequest>,
) -> Result<Response, SessionError> {
    let submission = Submission {
        question_ids: payload.question_ids,
        answers: payload.answers,
    };
    store
        .append(&payload.user_email, &payload.session_id, &submission)
        .await?;
    tracing::info!(
        user_email = payload.user_email,
        session_id = payload.session_id,
        questions = submission.question_ids.len(),
        "submission appended"
    );
    Ok(StatusCode::NO_CONTENT.into_response())
}
