//! Shared application state.

use std::sync::Arc;

use jotter_core::{NoteRepository, SessionStore};
use jotter_db::Database;

use crate::config::AuthSettings;

/// State handed to every handler and extractor.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        sessions: Arc<dyn SessionStore>,
        auth: AuthSettings,
    ) -> Self {
        Self {
            notes,
            sessions,
            auth: Arc::new(auth),
        }
    }

    /// State backed by the PostgreSQL repositories.
    pub fn from_database(db: &Database, auth: AuthSettings) -> Self {
        Self::new(
            Arc::new(db.notes.clone()),
            Arc::new(db.sessions.clone()),
            auth,
        )
    }
}
