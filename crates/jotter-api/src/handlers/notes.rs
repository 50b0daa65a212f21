//! Note routes.
//!
//! Reads return JSON; every successful mutation answers with a
//! `303 See Other` redirect to the page the client should show next.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use jotter_core::{dispatch, list, load, MutationRequest, Note, NoteId, NoteSummary};

use crate::error::ApiError;
use crate::handlers::{form_data, FormBody};
use crate::session::RequireUser;
use crate::state::AppState;

/// Detail view of a note.
#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_at_display: String,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            updated_at_display: note.updated_at_display(),
            id: note.id,
            title: note.title,
            body: note.body,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteDetailResponse {
    pub note: NoteView,
}

#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub note_list_items: Vec<NoteSummary>,
}

/// `GET /notes`
pub async fn list_notes(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<NoteListResponse>, ApiError> {
    let note_list_items = list(state.notes.as_ref(), user.user_id).await?;
    Ok(Json(NoteListResponse { note_list_items }))
}

/// `GET /notes/:id`
pub async fn get_note(
    user: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteDetailResponse>, ApiError> {
    let note_id: NoteId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Note {} not found", id)))?;
    let note = load(state.notes.as_ref(), user.user_id, note_id).await?;
    Ok(Json(NoteDetailResponse { note: note.into() }))
}

/// `POST /notes`: create, or update/delete the note named by the `id` field.
pub async fn notes_action(
    user: RequireUser,
    State(state): State<AppState>,
    body: FormBody,
) -> Result<Redirect, ApiError> {
    let form = form_data(body)?;
    let request = MutationRequest::from_form(&form, None)?;
    run(&state, &user, request).await
}

/// `POST /notes/:id`: update or delete the note named by the path.
pub async fn note_action(
    user: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FormBody,
) -> Result<Redirect, ApiError> {
    let form = form_data(body)?;
    let request = MutationRequest::from_form(&form, Some(&id))?;
    run(&state, &user, request).await
}

/// `POST /notes/new`: create without a discriminant.
pub async fn new_note_action(
    user: RequireUser,
    State(state): State<AppState>,
    body: FormBody,
) -> Result<Redirect, ApiError> {
    let form = form_data(body)?;
    run(&state, &user, MutationRequest::create_from_form(&form)).await
}

async fn run(
    state: &AppState,
    user: &RequireUser,
    request: MutationRequest,
) -> Result<Redirect, ApiError> {
    let outcome = dispatch(state.notes.as_ref(), user.user_id, request).await?;
    Ok(Redirect::to(&outcome.redirect_location()))
}
