use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use delfos_core::winner::{LedgerError, WinnerLedger};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_tally).post(record_winner))
}

#[derive(Error, Debug)]
pub(crate) enum WinnerError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl IntoResponse for WinnerError {
    fn into_response(self) -> Response {
        http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Optional attribution for the log line; none of it is persisted.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub(crate) struct RecordWinnerRequest {
    #[serde(default)]
    user_email: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub(crate) struct WinnerResponse {
    winner_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/v0/winners",
    responses(
        (status = OK, body = WinnerResponse, description = "The current winner tally"),
    ),
    tag = "v0/winners"
)]
pub(crate) async fn get_tally(
    Extension(ledger): Extension<WinnerLedger>,
) -> Result<Response, WinnerError> {
    let winner_count = ledger.read().await?;
    Ok(Json(WinnerResponse {
        winner_count,
        updated_at: None,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/v0/winners",
    request_body = RecordWinnerRequest,
    responses(
        (status = OK, body = WinnerResponse, description = "Tally after recording this winning event"),
    ),
    tag = "v0/winners"
)]
pub(crate) async fn record_winner(
    Extension(ledger): Extension<WinnerLedger>,
    payload: Option<Json<RecordWinnerRequest>>,
) -> Result<Response, WinnerError> {
    let meta = payload.map(|Json(meta)| meta).unwrap_or_default();
    let winner_count = ledger.increment().await?;
    match meta.user_email {
        Some(user_email) => tracing::info!(
            winner = winner_count,
            user_email,
            session_id = ?meta.session_id,
            "winner recorded"
        ),
        None => tracing::info!(winner = winner_count, "winner recorded"),
    }
    Ok(Json(WinnerResponse {
        winner_count,
        updated_at: Some(Utc::now()),
    })
    .into_response())
}
