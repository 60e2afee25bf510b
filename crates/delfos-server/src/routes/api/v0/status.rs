use crate::AppConfig;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use delfos_core::store::SessionStore;
use http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_status)).with_state(())
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub(crate) struct Status {
    /// Questions held by the loaded bank.
    questions: usize,
    /// `ok` when the session data directory is reachable.
    storage: String,
}

impl Status {
    fn status_code(&self) -> StatusCode {
        if self.storage == "ok" {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        (status_code, Json(self)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, body = Status, description = "Server is ok"),
        (status = INTERNAL_SERVER_ERROR, body = Status, description = "Session storage is unavailable"),
    ),
    tag = "util"
)]
pub(crate) async fn get_status(
    Extension(app_config): Extension<AppConfig>,
    Extension(store): Extension<SessionStore>,
) -> impl IntoResponse {
    let storage = match tokio::fs::metadata(store.data_dir()).await {
        Ok(metadata) if metadata.is_dir() => "ok".to_string(),
        Ok(_) => "not a directory".to_string(),
        Err(error) => {
            tracing::warn!(error = %error, "session storage unavailable");
            "unavailable".to_string()
        }
    };
    Status {
        questions: app_config.bank().question_count(),
        storage,
    }
}
