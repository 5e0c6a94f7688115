//! Core type definitions for the students service.
//!
//! This crate defines the storage-agnostic types shared by the store and the
//! HTTP layer:
//! - [`Student`], the persisted record
//! - [`StudentPayload`], the inbound body for create and update requests
//! - [`ValidationErrors`], the ordered field failures produced by validation

mod student;
mod validation;

pub use student::{Student, StudentPayload};
pub use validation::{FieldError, Rule, ValidationErrors};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a request payload.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty Body")]
    EmptyBody,

    #[error("invalid request body: {0}")]
    Serialization(#[from] serde_json::Error),
}
