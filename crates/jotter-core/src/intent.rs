//! Intent discriminant and the tagged mutation request.
//!
//! Every mutating note endpoint accepts create, update and delete through a
//! single form. The operation is named by the `intent` field; the older
//! `_action` spelling is not recognized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::form::FormData;
use crate::models::NoteId;
use crate::validation::{FormErrors, NoteInput};

/// Name of the discriminant field on every mutating form.
pub const INTENT_FIELD: &str = "intent";

/// Field carrying the target note id when the route does not.
pub const ID_FIELD: &str = "id";

/// Message returned when update/delete arrives without a target.
pub const ID_REQUIRED: &str = "id is required";

/// Operation requested by a mutating form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    Update,
    Delete,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::Update => "update",
            Intent::Delete => "delete",
        }
    }

    /// Read the discriminant from a form without consuming it.
    pub fn peek(form: &FormData) -> Option<Intent> {
        form.get(INTENT_FIELD).and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a discriminant value is not a known intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent: {0:?}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "create" => Ok(Intent::Create),
            "update" => Ok(Intent::Update),
            "delete" => Ok(Intent::Delete),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}

/// A mutating request, one variant per intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create { input: NoteInput },
    Update { note_id: NoteId, input: NoteInput },
    Delete { note_id: NoteId },
}

impl MutationRequest {
    /// Build a request from submitted form data.
    ///
    /// `route_id` is the note id carried by the URL, if any; it takes
    /// precedence over the form's `id` field. A route that names a note
    /// only edits or deletes it, so `create` there is rejected like an
    /// unknown intent. A missing or unknown intent, or an update/delete with
    /// no target, is a [`Error::BadRequest`]. A target that is not a valid
    /// note id is reported as not found.
    pub fn from_form(form: &FormData, route_id: Option<&str>) -> Result<Self> {
        let raw_intent = form.get(INTENT_FIELD);
        let intent = match raw_intent.map(str::parse::<Intent>) {
            Some(Ok(Intent::Create)) if route_id.is_some() => {
                tracing::debug!(
                    subsystem = "core",
                    op = "dispatch",
                    intent = "create",
                    "Rejecting create on a note route"
                );
                return Err(Error::BadRequest(FormErrors::generic()));
            }
            Some(Ok(intent)) => intent,
            _ => {
                tracing::debug!(
                    subsystem = "core",
                    op = "dispatch",
                    intent = raw_intent.unwrap_or("<missing>"),
                    "Rejecting request with unrecognized intent"
                );
                return Err(Error::BadRequest(FormErrors::generic()));
            }
        };

        match intent {
            Intent::Create => Ok(MutationRequest::Create {
                input: NoteInput::from_form(form),
            }),
            Intent::Update => Ok(MutationRequest::Update {
                note_id: target_id(form, route_id)?,
                input: NoteInput::from_form(form),
            }),
            Intent::Delete => Ok(MutationRequest::Delete {
                note_id: target_id(form, route_id)?,
            }),
        }
    }

    /// Build a create request from a form that carries no discriminant.
    pub fn create_from_form(form: &FormData) -> Self {
        MutationRequest::Create {
            input: NoteInput::from_form(form),
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            MutationRequest::Create { .. } => Intent::Create,
            MutationRequest::Update { .. } => Intent::Update,
            MutationRequest::Delete { .. } => Intent::Delete,
        }
    }

    pub fn note_id(&self) -> Option<NoteId> {
        match self {
            MutationRequest::Create { .. } => None,
            MutationRequest::Update { note_id, .. } | MutationRequest::Delete { note_id } => {
                Some(*note_id)
            }
        }
    }
}

fn target_id(form: &FormData, route_id: Option<&str>) -> Result<NoteId> {
    let raw = route_id
        .or_else(|| form.get(ID_FIELD))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::BadRequest(FormErrors::new(ID_REQUIRED)))?;

    raw.parse::<NoteId>()
        .map_err(|_| Error::NotFound(format!("Note {} not found", raw)))
}
