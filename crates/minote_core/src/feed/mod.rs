//! Live note list queries.
//!
//! # Responsibility
//! - Keep an ordered snapshot of all notes that can be observed for change.
//!
//! # Invariants
//! - Every repository mutation is visible to the next `poll`.

pub mod note_feed;
