//! Per-field validation and the error records returned to the form.
//!
//! Validation is fail-fast: `title` is checked first and `body` only when
//! the title passed, so an error record never names both fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::FormData;

pub const TITLE_FIELD: &str = "title";
pub const BODY_FIELD: &str = "body";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const BODY_REQUIRED: &str = "Body is required";

/// Message used when a mutating request cannot be routed.
pub const GENERIC_FORM_ERROR: &str = "Something went wrong!";

/// A validated field of the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteField {
    Title,
    Body,
}

impl NoteField {
    pub fn name(&self) -> &'static str {
        match self {
            NoteField::Title => TITLE_FIELD,
            NoteField::Body => BODY_FIELD,
        }
    }
}

/// Per-field validation errors.
///
/// Fields without an error serialize as `null` so clients can clear stale
/// messages by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ValidationErrors {
    pub fn title(message: impl Into<String>) -> Self {
        Self {
            title: Some(message.into()),
            body: None,
        }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// Field the form should focus when re-rendered.
    pub fn first_invalid_field(&self) -> Option<NoteField> {
        if self.title.is_some() {
            Some(NoteField::Title)
        } else if self.body.is_some() {
            Some(NoteField::Body)
        } else {
            None
        }
    }

    pub fn message_for(&self, field: NoteField) -> Option<&str> {
        match field {
            NoteField::Title => self.title.as_deref(),
            NoteField::Body => self.body.as_deref(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_invalid_field() {
            Some(field) => write!(
                f,
                "{}: {}",
                field.name(),
                self.message_for(field).unwrap_or_default()
            ),
            None => write!(f, "no errors"),
        }
    }
}

/// Form-level error, not attached to any single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    pub form_error: String,
}

impl FormErrors {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            form_error: message.into(),
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_FORM_ERROR)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.form_error)
    }
}

/// Raw, unvalidated note fields as submitted.
///
/// `None` means the field was not submitted at all; both absence and the
/// empty string fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Note fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    pub title: String,
    pub body: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    pub fn from_form(form: &FormData) -> Self {
        Self {
            title: form.get(TITLE_FIELD).map(str::to_owned),
            body: form.get(BODY_FIELD).map(str::to_owned),
        }
    }

    /// Validate title, then body. The first failure wins.
    pub fn validate(self) -> Result<ValidNote, ValidationErrors> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(ValidationErrors::title(TITLE_REQUIRED)),
        };
        let body = match self.body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ValidationErrors::body(BODY_REQUIRED)),
        };
        Ok(ValidNote { title, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let valid = NoteInput::new("Groceries", "Milk, eggs").validate().unwrap();
        assert_eq!(valid.title, "Groceries");
        assert_eq!(valid.body, "Milk, eggs");
    }

    #[test]
    fn test_empty_title_reports_title_only() {
        let errors = NoteInput::new("", "").validate().unwrap_err();
        assert_eq!(errors.title.as_deref(), Some(TITLE_REQUIRED));
        assert_eq!(errors.body, None);
    }

    #[test]
    fn test_missing_title_is_required() {
        let input = NoteInput {
            title: None,
            body: Some("text".to_string()),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors, ValidationErrors::title(TITLE_REQUIRED));
    }

    #[test]
    fn test_empty_body_checked_after_title() {
        let errors = NoteInput::new("Groceries", "").validate().unwrap_err();
        assert_eq!(errors.title, None);
        assert_eq!(errors.body.as_deref(), Some(BODY_REQUIRED));
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        assert!(NoteInput::new(" ", " ").validate().is_ok());
    }

    #[test]
    fn test_errors_serialize_with_nulls() {
        let json = serde_json::to_value(ValidationErrors::title(TITLE_REQUIRED)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Title is required", "body": null })
        );
    }

    #[test]
    fn test_form_errors_serialize_camel_case() {
        let json = serde_json::to_value(FormErrors::generic()).unwrap();
        assert_eq!(json, serde_json::json!({ "formError": "Something went wrong!" }));
    }

    #[test]
    fn test_first_invalid_field() {
        assert_eq!(
            ValidationErrors::title("x").first_invalid_field(),
            Some(NoteField::Title)
        );
        assert_eq!(
            ValidationErrors::body("x").first_invalid_field(),
            Some(NoteField::Body)
        );
        assert_eq!(ValidationErrors::default().first_invalid_field(), None);
        assert!(ValidationErrors::default().is_empty());
    }

    #[test]
    fn test_input_from_form() {
        let form = FormData::new().with("title", "T").with("intent", "create");
        let input = NoteInput::from_form(&form);
        assert_eq!(input.title.as_deref(), Some("T"));
        assert_eq!(input.body, None);
    }
}
