//! Note actions: the handlers behind every note route.
//!
//! Each function takes the caller's [`UserId`], which the HTTP layer only
//! obtains from the session gate, and passes it into every repository call.
//! Validation always runs before the repository is touched, so a rejected
//! request never leaves a partial write behind.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::intent::MutationRequest;
use crate::models::{Note, NoteId, NoteSummary, UserId, NOTES_PATH};
use crate::traits::NoteRepository;
use crate::validation::NoteInput;

/// Successful result of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(Note),
    Updated(Note),
    Deleted(NoteId),
}

impl MutationOutcome {
    /// Where the client should be sent next.
    pub fn redirect_location(&self) -> String {
        match self {
            MutationOutcome::Created(note) | MutationOutcome::Updated(note) => note.detail_path(),
            MutationOutcome::Deleted(_) => NOTES_PATH.to_string(),
        }
    }

    pub fn note_id(&self) -> NoteId {
        match self {
            MutationOutcome::Created(note) | MutationOutcome::Updated(note) => note.id,
            MutationOutcome::Deleted(id) => *id,
        }
    }
}

/// Route a mutation to exactly one of create, update or delete.
pub async fn dispatch(
    notes: &dyn NoteRepository,
    owner: UserId,
    request: MutationRequest,
) -> Result<MutationOutcome> {
    debug!(
        subsystem = "core",
        op = "dispatch",
        user_id = %owner,
        intent = %request.intent(),
        "Dispatching note mutation"
    );

    match request {
        MutationRequest::Create { input } => create(notes, owner, input).await,
        MutationRequest::Update { note_id, input } => update(notes, owner, note_id, input).await,
        MutationRequest::Delete { note_id } => delete(notes, owner, note_id).await,
    }
}

/// Create a note owned by `owner`.
pub async fn create(
    notes: &dyn NoteRepository,
    owner: UserId,
    input: NoteInput,
) -> Result<MutationOutcome> {
    let valid = input.validate().inspect_err(|errors| {
        debug!(
            subsystem = "core",
            op = "create",
            user_id = %owner,
            field = errors.first_invalid_field().map(|f| f.name()),
            "Create rejected by validation"
        );
    })?;

    let note = notes.create_note(owner, &valid.title, &valid.body).await?;

    info!(
        subsystem = "core",
        op = "create",
        user_id = %owner,
        note_id = %note.id,
        "Note created"
    );
    Ok(MutationOutcome::Created(note))
}

/// Replace the title and body of one of `owner`'s notes.
pub async fn update(
    notes: &dyn NoteRepository,
    owner: UserId,
    note_id: NoteId,
    input: NoteInput,
) -> Result<MutationOutcome> {
    let valid = input.validate().inspect_err(|errors| {
        debug!(
            subsystem = "core",
            op = "update",
            user_id = %owner,
            note_id = %note_id,
            field = errors.first_invalid_field().map(|f| f.name()),
            "Update rejected by validation"
        );
    })?;

    let note = notes
        .edit_note(note_id, owner, &valid.title, &valid.body)
        .await?;

    info!(
        subsystem = "core",
        op = "update",
        user_id = %owner,
        note_id = %note.id,
        "Note updated"
    );
    Ok(MutationOutcome::Updated(note))
}

/// Permanently delete one of `owner`'s notes.
pub async fn delete(
    notes: &dyn NoteRepository,
    owner: UserId,
    note_id: NoteId,
) -> Result<MutationOutcome> {
    notes.delete_note(note_id, owner).await?;

    info!(
        subsystem = "core",
        op = "delete",
        user_id = %owner,
        note_id = %note_id,
        "Note deleted"
    );
    Ok(MutationOutcome::Deleted(note_id))
}

/// Fetch one of `owner`'s notes for the detail view.
pub async fn load(notes: &dyn NoteRepository, owner: UserId, note_id: NoteId) -> Result<Note> {
    notes
        .get_note(note_id, owner)
        .await?
        .ok_or(Error::NoteNotFound(note_id))
}

/// List `owner`'s notes for the list view.
pub async fn list(notes: &dyn NoteRepository, owner: UserId) -> Result<Vec<NoteSummary>> {
    let items = notes.get_note_list_items(owner).await?;
    debug!(
        subsystem = "core",
        op = "list",
        user_id = %owner,
        result_count = items.len(),
        "Listed notes"
    );
    Ok(items)
}
