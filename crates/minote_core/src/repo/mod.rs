//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note persistence contract used by services and the feed.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Invalid persisted state is rejected on read, never masked.

pub mod note_repo;
