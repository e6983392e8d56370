//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Track a mutation stamp so live queries can detect changes cheaply.
//!
//! # Invariants
//! - `list` ordering is `timestamp DESC, id DESC` and deterministic.
//! - Zero-rows-changed writes surface as `NotFound`, not silent success.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::note::{Note, NoteId, UNSAVED_NOTE_ID};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    timestamp
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque change marker for the note store.
///
/// Two equal stamps mean no observable change happened between them;
/// `mutations` covers writes through this repository, `data_version`
/// covers commits made by other connections to the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeStamp {
    pub mutations: u64,
    pub data_version: i64,
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Inserts a new row from `title`/`content`/`timestamp` and returns the
    /// storage-assigned id. The note's own `id` field is ignored.
    fn insert(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces the full row identified by `note.id`.
    fn update(&self, note: &Note) -> RepoResult<()>;
    /// Gets one note by id. The unsaved identity (`0`) is always absent.
    fn get_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Permanently removes the row identified by `note.id`.
    fn delete(&self, note: &Note) -> RepoResult<()>;
    /// Lists all notes ordered by recency.
    fn list(&self) -> RepoResult<Vec<Note>>;
    /// Returns the current change marker for the store.
    fn change_stamp(&self) -> RepoResult<ChangeStamp>;
}

impl<R: NoteRepository> NoteRepository for &R {
    fn insert(&self, note: &Note) -> RepoResult<NoteId> {
        (**self).insert(note)
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        (**self).update(note)
    }

    fn get_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        (**self).get_by_id(id)
    }

    fn delete(&self, note: &Note) -> RepoResult<()> {
        (**self).delete(note)
    }

    fn list(&self) -> RepoResult<Vec<Note>> {
        (**self).list()
    }

    fn change_stamp(&self) -> RepoResult<ChangeStamp> {
        (**self).change_stamp()
    }
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
    mutations: AtomicU64,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_notes_table_ready(conn)?;
        Ok(Self {
            conn,
            mutations: AtomicU64::new(0),
        })
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, note: &Note) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (title, content, timestamp) VALUES (?1, ?2, ?3);",
            params![note.title.as_str(), note.content.as_str(), note.timestamp],
        )?;

        self.record_mutation();
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                timestamp = ?4
             WHERE id = ?1;",
            params![
                note.id,
                note.title.as_str(),
                note.content.as_str(),
                note.timestamp,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        self.record_mutation();
        Ok(())
    }

    fn get_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        if id == UNSAVED_NOTE_ID {
            return Ok(None);
        }

        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn delete(&self, note: &Note) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [note.id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        self.record_mutation();
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY timestamp DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn change_stamp(&self) -> RepoResult<ChangeStamp> {
        let data_version = self
            .conn
            .query_row("PRAGMA data_version;", [], |row| row.get::<_, i64>(0))?;
        Ok(ChangeStamp {
            mutations: self.mutations.load(Ordering::SeqCst),
            data_version,
        })
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("id")?;
    if id == UNSAVED_NOTE_ID {
        return Err(RepoError::InvalidData(
            "reserved id 0 found in notes.id".to_string(),
        ));
    }

    let timestamp = row
        .get::<_, i64>("timestamp")
        .map_err(|_| RepoError::InvalidData(format!("non-integer timestamp in notes row {id}")))?;

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        timestamp,
    })
}

fn ensure_notes_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::InvalidData(
            "required table `notes` is missing".to_string(),
        ));
    }

    for column in ["id", "title", "content", "timestamp"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::InvalidData(format!(
                "required column `notes.{column}` is missing"
            )));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
