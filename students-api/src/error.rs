//! Errors surfaced by request handlers.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use students_db::StorageError;
use students_types::ValidationErrors;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::{write_json, ErrorResponse};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a request can fail. Each variant renders as the error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("empty Body")]
    EmptyBody,

    #[error("invalid request body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("invalid id")]
    InvalidId,

    /// The body could not be buffered, e.g. it exceeds the size limit.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("student not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Storage(StorageError),

    /// The blocking storage task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::InvalidJson(_)
            | ApiError::InvalidId
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<students_types::Error> for ApiError {
    fn from(err: students_types::Error) -> Self {
        match err {
            students_types::Error::EmptyBody => ApiError::EmptyBody,
            students_types::Error::Serialization(e) => ApiError::InvalidJson(e),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = match &self {
            ApiError::Validation(errors) => ErrorResponse::validation(errors),
            other => ErrorResponse::general(other),
        };
        write_json(status, body)
    }
}
