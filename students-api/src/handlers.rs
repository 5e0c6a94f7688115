//! Student request handlers.
//!
//! Each handler decodes, validates, calls storage on the blocking pool and
//! writes the JSON response. Failures are returned as [`ApiError`] and
//! rendered by its `IntoResponse` impl.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Response,
};
use students_db::{Storage, StorageResult};
use students_types::StudentPayload;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::response::{write_json, CreatedResponse, StatusResponse};
use crate::AppState;

/// Runs a storage call off the async workers.
async fn with_storage<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&dyn Storage) -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    tokio::task::spawn_blocking(move || f(storage.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

/// Any id that is not a decimal `i64`, including undecodable path
/// segments, is an invalid id.
fn parse_id(raw: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    let Path(raw) = raw.map_err(|_| ApiError::InvalidId)?;
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// `POST /api/students`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    info!("new student request");

    let body = body?;
    let payload = StudentPayload::from_json(&body)?;
    payload.validate_new()?;

    let StudentPayload { name, age, email } = payload;
    let id = with_storage(&state, move |s| s.create_student(&name, &email, age)).await?;

    info!(id, "student created");
    Ok(write_json(StatusCode::CREATED, CreatedResponse { id }))
}

/// `GET /api/students/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let id = parse_id(raw_id)?;
    info!(id, "getting a student");

    let student = with_storage(&state, move |s| s.get_student_by_id(id)).await?;
    Ok(write_json(StatusCode::OK, student))
}

/// `GET /api/students`
pub async fn list(State(state): State<AppState>) -> ApiResult<Response> {
    info!("getting all students");

    let students = with_storage(&state, |s| s.get_students()).await?;
    Ok(write_json(StatusCode::OK, students))
}

/// `PUT /api/students/{id}` and `PATCH /api/students/{id}`
///
/// Sparse update: empty strings and a zero age keep the stored value.
pub async fn update(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    let id = parse_id(raw_id)?;
    info!(id, "updating a student");

    let body = body?;
    let payload = StudentPayload::from_json(&body)?;
    payload.validate_update()?;

    let existing = with_storage(&state, move |s| s.get_student_by_id(id)).await?;
    let merged = payload.apply_to(existing);

    with_storage(&state, move |s| {
        s.update_student(id, &merged.name, &merged.email, merged.age)
    })
    .await?;

    info!(id, "student updated");
    Ok(write_json(StatusCode::OK, StatusResponse::ok()))
}
