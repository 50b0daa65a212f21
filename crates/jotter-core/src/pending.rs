//! Pending-state projection for in-flight submissions.
//!
//! The presentation layer never stores "what is happening right now".
//! It asks [`derive_state`] on every render, passing the form of the
//! submission that has been sent but not yet answered. When nothing is
//! outstanding the answer is [`PendingState::Idle`].
//!
//! The result is for display only (spinners, disabled buttons). It must not
//! feed authorization or persistence decisions.

use serde::{Deserialize, Serialize};

use crate::form::FormData;
use crate::intent::Intent;

/// Display state derived from the outstanding submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingState {
    Idle,
    Creating,
    Updating,
    Deleting,
}

impl PendingState {
    /// Whether form controls should be disabled.
    pub fn is_submitting(&self) -> bool {
        !matches!(self, PendingState::Idle)
    }

    /// Whether a save (create or update) is in flight.
    pub fn is_saving(&self) -> bool {
        matches!(self, PendingState::Creating | PendingState::Updating)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, PendingState::Deleting)
    }

    /// Label for the control that triggered the submission.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            PendingState::Idle => None,
            PendingState::Creating | PendingState::Updating => Some("Saving..."),
            PendingState::Deleting => Some("Deleting..."),
        }
    }
}

/// Derive the display state from the outstanding submission, if any.
///
/// Only the `intent` field is inspected. A submission whose intent is
/// missing or unknown derives to `Idle`.
pub fn derive_state(pending: Option<&FormData>) -> PendingState {
    match pending.and_then(Intent::peek) {
        Some(Intent::Create) => PendingState::Creating,
        Some(Intent::Update) => PendingState::Updating,
        Some(Intent::Delete) => PendingState::Deleting,
        None => PendingState::Idle,
    }
}

/// The transport's view of the current form submission.
///
/// Holds the submitted form from `submit` until `settle`; the derived state
/// is recomputed from it on each call and never cached.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    pending: Option<FormData>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission that has been sent.
    ///
    /// A newer submission replaces any older one still outstanding.
    pub fn submit(&mut self, form: FormData) {
        self.pending = Some(form);
    }

    /// Record that the outstanding submission was answered, successfully
    /// or not. Returns the settled form.
    pub fn settle(&mut self) -> Option<FormData> {
        self.pending.take()
    }

    pub fn pending_form(&self) -> Option<&FormData> {
        self.pending.as_ref()
    }

    /// Any submission is outstanding, whatever its intent.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> PendingState {
        derive_state(self.pending_form())
    }
}
