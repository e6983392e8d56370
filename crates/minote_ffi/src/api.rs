//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, screen-level functions to Dart via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Response envelopes always carry `ok` plus a diagnostic message.

use minote_core::db::open_db;
use minote_core::{
    core_version as core_version_inner, derive_list_preview, init_logging as init_logging_inner,
    ping as ping_inner, NoteEditor, NoteRepository, SqliteNoteRepository, UNSAVED_NOTE_ID,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "minote.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// List row for the notes screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    /// Stable note id.
    pub id: i64,
    /// Title with the `Untitled` fallback already applied.
    pub display_title: String,
    /// One-line content preview (absent for blank notes).
    pub preview: Option<String>,
    /// Last save instant in epoch milliseconds.
    pub timestamp: i64,
}

/// Response envelope for the list screen query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Whether the query succeeded.
    pub ok: bool,
    /// Rows ordered by recency (empty on failure).
    pub items: Vec<NoteListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Response envelope for loading one note into the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLoadResponse {
    /// Whether the lookup executed without a store failure.
    pub ok: bool,
    /// Whether a persisted note was found for the requested id.
    pub found: bool,
    /// Draft title to show (empty for new/absent notes).
    pub title: String,
    /// Draft content to show (empty for new/absent notes).
    pub content: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for save/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Effective note id (assigned id for first saves).
    pub note_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: i64) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Returns all notes ordered by recency for the list screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Blank titles arrive with the `Untitled` display fallback applied.
#[flutter_rust_bridge::frb(sync)]
pub fn note_list() -> NoteListResponse {
    let listed = with_repo(|repo| repo.list().map_err(|err| format!("note_list failed: {err}")));

    match listed {
        Ok(notes) => {
            let items = notes
                .iter()
                .map(|note| NoteListItem {
                    id: note.id,
                    display_title: note.display_title().to_owned(),
                    preview: derive_list_preview(&note.content),
                    timestamp: note.timestamp,
                })
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No notes yet.".to_string()
            } else {
                format!("Loaded {} note(s).", items.len())
            };
            NoteListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => NoteListResponse {
            ok: false,
            items: Vec::new(),
            message: err,
        },
    }
}

/// Loads one note's draft fields for the detail screen.
///
/// Requesting id `0` (or an id that no longer exists) yields an empty
/// new-note draft with `found == false`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_load(id: i64) -> NoteLoadResponse {
    let loaded = with_repo(|repo| {
        repo.get_by_id(id)
            .map_err(|err| format!("note_load failed: {err}"))
    });

    match loaded {
        Ok(Some(note)) => NoteLoadResponse {
            ok: true,
            found: true,
            title: note.title,
            content: note.content,
            message: "Note loaded.".to_string(),
        },
        Ok(None) => NoteLoadResponse {
            ok: true,
            found: false,
            title: String::new(),
            content: String::new(),
            message: "Note not found; starting a new draft.".to_string(),
        },
        Err(err) => NoteLoadResponse {
            ok: false,
            found: false,
            title: String::new(),
            content: String::new(),
            message: err,
        },
    }
}

/// Saves the detail screen draft.
///
/// `id == 0` inserts a new note; a non-zero id updates the existing note
/// with a refreshed timestamp. An id whose note vanished behaves like the
/// original screen flow: the draft is saved as a new note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the effective note id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(id: i64, title: String, content: String) -> NoteActionResponse {
    let saved = with_repo(|repo| {
        let mut editor = NoteEditor::new(repo);
        editor
            .load(id)
            .map_err(|err| format!("note_save failed: {err}"))?;
        editor.set_title(title);
        editor.set_content(content);
        editor
            .save()
            .map_err(|err| format!("note_save failed: {err}"))
    });

    match saved {
        Ok(note_id) => NoteActionResponse::success("Note saved.", note_id),
        Err(err) => NoteActionResponse::failure(err),
    }
}

/// Deletes one note by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an absent id reports failure with a not-found message.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: i64) -> NoteActionResponse {
    if id == UNSAVED_NOTE_ID {
        return NoteActionResponse::failure("note_delete failed: note was never saved");
    }

    let deleted = with_repo(|repo| {
        let mut editor = NoteEditor::new(repo);
        let found = editor
            .load(id)
            .map_err(|err| format!("note_delete failed: {err}"))?;
        if !found {
            return Err(format!("note_delete failed: note not found: {id}"));
        }
        editor
            .delete()
            .map_err(|err| format!("note_delete failed: {err}"))
    });

    match deleted {
        Ok(()) => NoteActionResponse::success("Note deleted.", id),
        Err(err) => NoteActionResponse::failure(err),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MINOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_repo<T>(f: impl FnOnce(&SqliteNoteRepository<'_>) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        log::warn!(
            "event=ffi_db_open module=ffi status=error path={} error={err}",
            db_path.display()
        );
        format!("db open failed: {err}")
    })?;
    let repo =
        SqliteNoteRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    f(&repo)
}
