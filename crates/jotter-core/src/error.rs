//! Error types for jotter.

use thiserror::Error;

use crate::models::NoteId;
use crate::validation::{FormErrors, ValidationErrors};

/// Result type alias using jotter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jotter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note is absent or not owned by the caller
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Resource not found (used when no typed id is available)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Per-field validation failed before any write
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// The request could not be routed to an operation
    #[error("Bad request: {0}")]
    BadRequest(FormErrors),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for Error {
    fn from(e: ValidationErrors) -> Self {
        Error::ValidationFailed(e)
    }
}
