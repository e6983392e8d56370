//! Core use-case services.
//!
//! # Responsibility
//! - Translate screen events into repository calls and observable state.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod editor;
pub mod preview;
