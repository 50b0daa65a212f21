//! HTTP handlers.

pub mod auth;
pub mod health;
pub mod notes;

use axum::{extract::rejection::FormRejection, http::StatusCode, Form};
use tracing::debug;

use jotter_core::{FormData, FormErrors};

use crate::error::ApiError;

/// Submitted form fields, decoded exactly once.
pub type FormBody = Result<Form<Vec<(String, String)>>, FormRejection>;

/// Turn the decoded body into [`FormData`], mapping an undecodable body to
/// the generic form error.
pub(crate) fn form_data(body: FormBody) -> Result<FormData, ApiError> {
    match body {
        Ok(Form(fields)) => Ok(FormData::from(fields)),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge)
        }
        Err(rejection) => {
            debug!(
                subsystem = "api",
                error = %rejection.body_text(),
                "Rejecting undecodable form body"
            );
            Err(ApiError::BadRequest(FormErrors::generic()))
        }
    }
}
