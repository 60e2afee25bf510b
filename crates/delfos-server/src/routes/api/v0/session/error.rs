use axum::response::{IntoResponse, Response};
use delfos_core::store::error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let Self::Store(error) = self;
        match error {
            StoreError::AlreadyExists { .. } => http::StatusCode::CONFLICT.into_response(),
            StoreError::NotFound { .. } => http::StatusCode::NOT_FOUND.into_response(),
            StoreError::InvalidKey(_) => http::StatusCode::BAD_REQUEST.into_response(),
            StoreError::Corrupt(_) | StoreError::Io(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
