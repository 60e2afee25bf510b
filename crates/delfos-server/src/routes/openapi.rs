use super::api;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::question::select_questions,
        api::v0::question::get_question,
        api::v0::question::get_answer,
        api::v0::session::create_session,
        api::v0::session::append_submission,
        api::v0::evaluation::evaluate_answers,
        api::v0::winner::get_tally,
        api::v0::winner::record_winner,
    ),
    tags()
)]
struct ApiDoc;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api-docs/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
