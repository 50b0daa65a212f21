//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::error;

use jotter_core::{FormErrors, ValidationErrors};

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// No valid session; answered with a redirect to `login_url`.
    Unauthenticated { login_url: String },
    /// Per-field validation failure.
    Validation(ValidationErrors),
    /// Request could not be routed to an operation.
    BadRequest(FormErrors),
    NotFound(String),
    PayloadTooLarge,
    Internal(String),
}

impl From<jotter_core::Error> for ApiError {
    fn from(err: jotter_core::Error) -> Self {
        use jotter_core::Error;

        match err {
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note {} not found", id)),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::ValidationFailed(errors) => ApiError::Validation(errors),
            Error::BadRequest(errors) => ApiError::BadRequest(errors),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated { login_url } => Redirect::to(&login_url).into_response(),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::BadRequest(errors) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(serde_json::json!({ "error": "Request body too large" })),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                error!(subsystem = "api", error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
