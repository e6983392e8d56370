//! Core domain logic for Minote.
//! This crate is the single source of truth for note persistence and
//! screen-state invariants.

pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod nav;
pub mod repo;
pub mod service;

pub use feed::note_feed::NoteFeed;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{now_epoch_ms, Note, NoteId, UNSAVED_NOTE_ID};
pub use nav::router::{Destination, Router};
pub use repo::note_repo::{
    ChangeStamp, NoteRepository, RepoError, RepoResult, SqliteNoteRepository,
};
pub use service::editor::{Clock, EditorError, NoteEditor, SystemClock};
pub use service::preview::derive_list_preview;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
