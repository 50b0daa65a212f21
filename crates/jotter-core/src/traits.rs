//! Core traits for jotter abstractions.
//!
//! These traits define the storage and session interfaces the request
//! logic depends on, so the service can run against PostgreSQL in
//! production and an in-memory store in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Owner-scoped note storage.
///
/// Every method takes the caller's [`UserId`]; there is no unscoped
/// variant. A note that exists but belongs to someone else is
/// indistinguishable from one that does not exist.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note if it exists and is owned by `owner`.
    async fn get_note(&self, id: NoteId, owner: UserId) -> Result<Option<Note>>;

    /// List the owner's notes, most recently updated first.
    async fn get_note_list_items(&self, owner: UserId) -> Result<Vec<NoteSummary>>;

    /// Insert a new note owned by `owner`.
    async fn create_note(&self, owner: UserId, title: &str, body: &str) -> Result<Note>;

    /// Replace a note's title and body and refresh `updated_at`.
    ///
    /// Fails with `Error::NoteNotFound` when the note is absent or not
    /// owned by `owner`.
    async fn edit_note(&self, id: NoteId, owner: UserId, title: &str, body: &str) -> Result<Note>;

    /// Permanently delete a note.
    ///
    /// Fails with `Error::NoteNotFound` when the note is absent or not
    /// owned by `owner`; deleting an absent note is never a silent success.
    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<()>;
}

// =============================================================================
// SESSION TRAITS
// =============================================================================

/// Resolves opaque session tokens to user identities.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a token to its user. Expired or unknown tokens yield `None`.
    ///
    /// Resolution is read-only: it never extends, rotates or otherwise
    /// mutates the session.
    async fn resolve(&self, token: &str) -> Result<Option<UserId>>;

    /// Issue a new session for `user`, valid for `ttl`.
    async fn create(&self, user: UserId, ttl: Duration) -> Result<String>;

    /// Revoke a session. Revoking an unknown token is a no-op.
    async fn revoke(&self, token: &str) -> Result<()>;
}
