//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted title/content/timestamp record.
//! - Provide draft constructors for the new-note flow.
//!
//! # Invariants
//! - `id == 0` denotes a not-yet-persisted note.
//! - Any non-zero `id` is a stable identity assigned by storage.
//! - `timestamp` is epoch milliseconds of creation or last save.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage-assigned identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Sentinel identity for notes that exist only in memory.
pub const UNSAVED_NOTE_ID: NoteId = 0;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Storage identity; `0` until the first successful save.
    pub id: NoteId,
    /// Free text, defaults to empty.
    pub title: String,
    /// Free text, defaults to empty.
    pub content: String,
    /// Creation/last-modified instant in epoch milliseconds.
    pub timestamp: i64,
}

impl Note {
    /// Creates an unsaved note stamped with the current instant.
    pub fn draft(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::draft_at(title, content, now_epoch_ms())
    }

    /// Creates an unsaved note with a caller-provided timestamp.
    ///
    /// Used by save paths that stamp time through an injected clock.
    pub fn draft_at(
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: UNSAVED_NOTE_ID,
            title: title.into(),
            content: content.into(),
            timestamp,
        }
    }

    /// Returns whether storage has assigned this note an identity.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_NOTE_ID
    }

    /// Title for list display; blank titles fall back to `Untitled`.
    ///
    /// Display-only: storage keeps the empty string verbatim.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            "Untitled"
        } else {
            trimmed
        }
    }
}

/// Current instant in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
