//! Core data models for jotter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an authenticated user, as resolved by the session gate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new time-ordered user id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a note.
///
/// UUIDv7, so ids sort by creation time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generate a new time-ordered note id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! uuid_newtype_conversions {
    ($ty:ident) => {
        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$ty> for Uuid {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $ty {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

uuid_newtype_conversions!(UserId);
uuid_newtype_conversions!(NoteId);

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Path of this note's detail view.
    pub fn detail_path(&self) -> String {
        note_path(self.id)
    }

    /// Human-readable last-updated timestamp, e.g. `Oct 18, 2026, 3:04 PM`.
    pub fn updated_at_display(&self) -> String {
        format_timestamp(&self.updated_at)
    }

    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id,
            title: self.title.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Lightweight list projection of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// Path of the note list view.
pub const NOTES_PATH: &str = "/notes";

/// Path of a single note's detail view.
pub fn note_path(id: NoteId) -> String {
    format!("{}/{}", NOTES_PATH, id)
}

/// Format a timestamp for display next to a note.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_note() -> Note {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 15, 4, 0).unwrap();
        Note {
            id: NoteId::from(Uuid::nil()),
            owner_id: UserId::new(),
            title: "Groceries".to_string(),
            body: "Milk, eggs".to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_note_id_roundtrips_through_str() {
        let id = NoteId::new();
        let parsed: NoteId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_note_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<NoteId>().is_err());
        assert!("".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_note_ids_are_time_ordered() {
        let first = NoteId::new();
        let second = NoteId::new();
        assert!(second >= first);
    }

    #[test]
    fn test_ids_serialize_as_plain_uuid() {
        let id = NoteId::from(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_detail_path() {
        let note = sample_note();
        assert_eq!(
            note.detail_path(),
            "/notes/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_updated_at_display() {
        let note = sample_note();
        assert_eq!(note.updated_at_display(), "Oct 18, 2026, 3:04 PM");
    }

    #[test]
    fn test_summary_carries_title_and_timestamp() {
        let note = sample_note();
        let summary = note.summary();
        assert_eq!(summary.id, note.id);
        assert_eq!(summary.title, "Groceries");
        assert_eq!(summary.updated_at, note.updated_at);
    }
}
