//! In-memory note and session stores.
//!
//! Used by tests and local development. Both stores are cheap to clone and
//! share state between clones. The note store records every call it
//! receives so tests can assert which repository operations a request
//! reached.
//!
//! ```rust
//! use jotter_db::memory::MemoryNoteRepository;
//!
//! let repo = MemoryNoteRepository::new();
//! assert!(repo.calls().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use jotter_core::{Error, Note, NoteId, NoteRepository, NoteSummary, Result, SessionStore, UserId};

use crate::sessions::{generate_token, hash_token, ttl_to_chrono};

/// A repository call observed by [`MemoryNoteRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    GetNote {
        id: NoteId,
        owner: UserId,
    },
    GetNoteListItems {
        owner: UserId,
    },
    CreateNote {
        owner: UserId,
        title: String,
        body: String,
    },
    EditNote {
        id: NoteId,
        owner: UserId,
        title: String,
        body: String,
    },
    DeleteNote {
        id: NoteId,
        owner: UserId,
    },
}

impl RepoCall {
    /// Whether the call would modify stored notes.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            RepoCall::CreateNote { .. } | RepoCall::EditNote { .. } | RepoCall::DeleteNote { .. }
        )
    }
}

/// In-memory implementation of NoteRepository.
#[derive(Clone, Default)]
pub struct MemoryNoteRepository {
    notes: Arc<RwLock<HashMap<NoteId, Note>>>,
    call_log: Arc<Mutex<Vec<RepoCall>>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RepoCall> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut log) = self.call_log.lock() {
            log.clear();
        }
    }

    /// Number of stored notes across all owners.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }

    fn record(&self, call: RepoCall) {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(call);
        }
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn get_note(&self, id: NoteId, owner: UserId) -> Result<Option<Note>> {
        self.record(RepoCall::GetNote { id, owner });
        let notes = self.notes.read().await;
        Ok(notes.get(&id).filter(|n| n.owner_id == owner).cloned())
    }

    async fn get_note_list_items(&self, owner: UserId) -> Result<Vec<NoteSummary>> {
        self.record(RepoCall::GetNoteListItems { owner });
        let notes = self.notes.read().await;
        let mut items: Vec<NoteSummary> = notes
            .values()
            .filter(|n| n.owner_id == owner)
            .map(Note::summary)
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn create_note(&self, owner: UserId, title: &str, body: &str) -> Result<Note> {
        self.record(RepoCall::CreateNote {
            owner,
            title: title.to_string(),
            body: body.to_string(),
        });
        let now = Utc::now();
        let note = Note {
            id: NoteId::new(),
            owner_id: owner,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn edit_note(&self, id: NoteId, owner: UserId, title: &str, body: &str) -> Result<Note> {
        self.record(RepoCall::EditNote {
            id,
            owner,
            title: title.to_string(),
            body: body.to_string(),
        });
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(&id)
            .filter(|n| n.owner_id == owner)
            .ok_or(Error::NoteNotFound(id))?;
        note.title = title.to_string();
        note.body = body.to_string();
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<()> {
        self.record(RepoCall::DeleteNote { id, owner });
        let mut notes = self.notes.write().await;
        match notes.get(&id) {
            Some(note) if note.owner_id == owner => {
                notes.remove(&id);
                Ok(())
            }
            _ => Err(Error::NoteNotFound(id)),
        }
    }
}

#[derive(Debug, Clone)]
struct MemorySession {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// In-memory implementation of SessionStore.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, MemorySession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Expiry of the session behind `token`, if stored.
    pub async fn expires_at(&self, token: &str) -> Option<DateTime<Utc>> {
        self.sessions
            .read()
            .await
            .get(&hash_token(token))
            .map(|s| s.expires_at)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<UserId>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&hash_token(token))
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user_id))
    }

    async fn create(&self, user: UserId, ttl: Duration) -> Result<String> {
        let token = generate_token();
        let session = MemorySession {
            user_id: user,
            expires_at: Utc::now() + ttl_to_chrono(ttl)?,
        };
        self.sessions
            .write()
            .await
            .insert(hash_token(&token), session);
        Ok(token)
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(&hash_token(token));
        Ok(())
    }
}
