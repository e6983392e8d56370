//! Poll-based live query over the note list.
//!
//! # Responsibility
//! - Serve the "all notes ordered by recency" sequence to list screens.
//! - Re-run the backing query only when the store actually changed.
//!
//! # Invariants
//! - `snapshot` always holds the result of a complete, ordered list query.
//! - A stamp is captured before its query, so a write racing the query can
//!   only cause one redundant re-read, never a missed update.

use crate::model::note::Note;
use crate::repo::note_repo::{ChangeStamp, NoteRepository, RepoResult};

/// Cached, change-aware view of the full note list.
///
/// Mutations made through the same repository bump its mutation counter;
/// commits from other connections move SQLite's `data_version`. Either
/// movement invalidates the snapshot on the next `poll`.
pub struct NoteFeed<R: NoteRepository> {
    repo: R,
    last_stamp: ChangeStamp,
    snapshot: Vec<Note>,
}

impl<R: NoteRepository> NoteFeed<R> {
    /// Builds a feed with an initial snapshot of the store.
    pub fn new(repo: R) -> RepoResult<Self> {
        let last_stamp = repo.change_stamp()?;
        let snapshot = repo.list()?;
        Ok(Self {
            repo,
            last_stamp,
            snapshot,
        })
    }

    /// Returns the most recently observed note list.
    pub fn snapshot(&self) -> &[Note] {
        &self.snapshot
    }

    /// Re-queries when the store changed since the last observation.
    ///
    /// Returns `Some(notes)` with the fresh snapshot after a change and
    /// `None` when the store is untouched.
    pub fn poll(&mut self) -> RepoResult<Option<&[Note]>> {
        let stamp = self.repo.change_stamp()?;
        if stamp == self.last_stamp {
            return Ok(None);
        }

        self.last_stamp = stamp;
        self.snapshot = self.repo.list()?;
        Ok(Some(&self.snapshot))
    }

    /// Unconditionally re-queries and returns the fresh snapshot.
    pub fn refresh(&mut self) -> RepoResult<&[Note]> {
        self.last_stamp = self.repo.change_stamp()?;
        self.snapshot = self.repo.list()?;
        Ok(&self.snapshot)
    }
}
