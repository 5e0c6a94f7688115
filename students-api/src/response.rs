//! JSON response bodies and the helper that writes them.
//!
//! Only failures are wrapped in an envelope; success payloads are written
//! as-is.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use students_types::ValidationErrors;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "ERROR";

/// Error envelope: `{"status": "ERROR", "error": "..."}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    /// Wraps any failure into the envelope.
    pub fn general(err: impl fmt::Display) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            error: err.to_string(),
        }
    }

    /// One message per failed field, joined with `", "`.
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::general(errors)
    }
}

/// Acknowledgement body: `{"status": "OK"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
        }
    }
}

/// Body of a successful create: `{"id": n}`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Serializes `data` as the JSON body with `status`.
pub fn write_json<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(data)).into_response()
}
