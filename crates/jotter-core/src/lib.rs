//! # jotter-core
//!
//! Core types, traits, and request logic for the jotter notes service.
//!
//! This crate owns everything between the session gate and the storage
//! layer: the note model, the owner-scoped repository traits, the
//! single-endpoint intent dispatcher with its per-field validation, and the
//! pending-state projection used by the presentation layer while a
//! submission is in flight.

pub mod actions;
pub mod error;
pub mod form;
pub mod intent;
pub mod logging;
pub mod models;
pub mod pending;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use actions::{create, delete, dispatch, list, load, update, MutationOutcome};
pub use error::{Error, Result};
pub use form::FormData;
pub use intent::{Intent, MutationRequest, ID_FIELD, INTENT_FIELD};
pub use models::*;
pub use pending::{derive_state, Navigation, PendingState};
pub use traits::*;
pub use validation::{FormErrors, NoteField, NoteInput, ValidNote, ValidationErrors};
