//! Note editing view-state coordinator.
//!
//! # Responsibility
//! - Hold the detail screen's draft title/content and loaded-note identity.
//! - Translate load/save/delete events into repository calls.
//!
//! # Invariants
//! - `current == None` means the draft describes a new, unsaved note.
//! - `save` refreshes the timestamp on every write.
//! - Persistence failures propagate unchanged; no retry, no rollback.

use crate::model::note::{now_epoch_ms, Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Timestamp source for save operations.
///
/// Production code uses `SystemClock`; tests inject fixed instants to make
/// "refreshed timestamp" assertions deterministic.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Process wall clock in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        now_epoch_ms()
    }
}

/// Editor-level error for detail screen operations.
#[derive(Debug)]
pub enum EditorError {
    /// `delete` was called while no note is loaded.
    NothingLoaded,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingLoaded => write!(f, "no note is loaded"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NothingLoaded => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for EditorError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// View-state coordinator for the note detail screen.
///
/// Operations complete before returning; the embedding UI dispatches them
/// off its interaction thread and waits for completion before navigating.
pub struct NoteEditor<R: NoteRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    current: Option<Note>,
    title: String,
    content: String,
}

impl<R: NoteRepository> NoteEditor<R> {
    /// Creates an editor holding a fresh new-note draft.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: NoteRepository, C: Clock> NoteEditor<R, C> {
    /// Creates an editor with an injected timestamp source.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            current: None,
            title: String::new(),
            content: String::new(),
        }
    }

    /// Replaces the draft title. Pure state mutation, no I/O.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the draft content. Pure state mutation, no I/O.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Loads a note by id and populates the draft from it.
    ///
    /// Returns `false` and resets to a new-note draft when the id is absent
    /// (including the unsaved identity `0`).
    pub fn load(&mut self, id: NoteId) -> Result<bool, EditorError> {
        match self.repo.get_by_id(id)? {
            Some(note) => {
                self.title = note.title.clone();
                self.content = note.content.clone();
                self.current = Some(note);
                Ok(true)
            }
            None => {
                self.clear();
                Ok(false)
            }
        }
    }

    /// Persists the draft.
    ///
    /// Editing an existing note updates it in place with a refreshed
    /// timestamp. Otherwise a new note is inserted and its assigned
    /// identity adopted, so a later save updates instead of duplicating.
    /// Empty drafts persist as-is.
    pub fn save(&mut self) -> Result<NoteId, EditorError> {
        let stamped_at = self.clock.now_epoch_ms();
        match self.current.as_mut() {
            Some(note) => {
                note.title = self.title.clone();
                note.content = self.content.clone();
                note.timestamp = stamped_at;
                self.repo.update(note)?;
                info!(
                    "event=note_save module=editor status=ok mode=update id={}",
                    note.id
                );
                Ok(note.id)
            }
            None => {
                let mut note =
                    Note::draft_at(self.title.clone(), self.content.clone(), stamped_at);
                note.id = self.repo.insert(&note)?;
                let id = note.id;
                self.current = Some(note);
                info!("event=note_save module=editor status=ok mode=insert id={id}");
                Ok(id)
            }
        }
    }

    /// Removes the currently loaded note and clears the draft.
    ///
    /// The loaded state is kept intact when the delete fails, matching the
    /// no-rollback failure policy: the caller sees the error, nothing else
    /// changes.
    pub fn delete(&mut self) -> Result<(), EditorError> {
        let note = self.current.clone().ok_or(EditorError::NothingLoaded)?;
        self.repo.delete(&note)?;
        info!(
            "event=note_delete module=editor status=ok id={}",
            note.id
        );
        self.clear();
        Ok(())
    }

    /// Resets to a fresh new-note draft.
    pub fn clear(&mut self) {
        self.current = None;
        self.title.clear();
        self.content.clear();
    }

    /// Current draft title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current draft content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the draft describes a note storage has never seen.
    pub fn is_new(&self) -> bool {
        self.current.is_none()
    }

    /// Identity of the loaded note, when one is loaded.
    pub fn current_id(&self) -> Option<NoteId> {
        self.current.as_ref().map(|note| note.id)
    }
}
