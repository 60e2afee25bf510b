use axum::response::{IntoResponse, Response};
use delfos_core::select::SelectError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum QuestionError {
    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("unknown profile: {0}")]
    ProfileNotFound(String),

    #[error(transparent)]
    Select(#[from] SelectError),
}

impl IntoResponse for QuestionError {
    fn into_response(self) -> Response {
        match self {
            Self::QuestionNotFound(_) | Self::ProfileNotFound(_) => {
                http::StatusCode::NOT_FOUND.into_response()
            }
            Self::Select(SelectError::InvalidCount { .. }) => {
                http::StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}
