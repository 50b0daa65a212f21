//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use jotter_core::{Error, Note, NoteId, NoteRepository, NoteSummary, Result, UserId};

/// PostgreSQL implementation of NoteRepository.
///
/// Every statement filters on `user_id`, so a note owned by another user
/// behaves exactly like a missing one.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn note_from_row(row: &PgRow) -> Note {
        Note {
            id: row.get("id"),
            owner_id: row.get("user_id"),
            title: row.get("title"),
            body: row.get("body"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn get_note(&self, id: NoteId, owner: UserId) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, body, created_at, updated_at
             FROM note WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(Self::note_from_row))
    }

    async fn get_note_list_items(&self, owner: UserId) -> Result<Vec<NoteSummary>> {
        let rows = sqlx::query(
            "SELECT id, title, updated_at FROM note
             WHERE user_id = $1
             ORDER BY updated_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| NoteSummary {
                id: r.get("id"),
                title: r.get("title"),
                updated_at: r.get("updated_at"),
            })
            .collect())
    }

    async fn create_note(&self, owner: UserId, title: &str, body: &str) -> Result<Note> {
        let id = NoteId::new();
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO note (id, user_id, title, body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id, user_id, title, body, created_at, updated_at",
        )
        .bind(id)
        .bind(owner)
        .bind(title)
        .bind(body)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Self::note_from_row(&row))
    }

    async fn edit_note(&self, id: NoteId, owner: UserId, title: &str, body: &str) -> Result<Note> {
        let now = Utc::now();

        // Ownership check and write happen in one statement.
        let row = sqlx::query(
            "UPDATE note SET title = $1, body = $2, updated_at = $3
             WHERE id = $4 AND user_id = $5
             RETURNING id, user_id, title, body, created_at, updated_at",
        )
        .bind(title)
        .bind(body)
        .bind(now)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref()
            .map(Self::note_from_row)
            .ok_or(Error::NoteNotFound(id))
    }

    async fn delete_note(&self, id: NoteId, owner: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}
