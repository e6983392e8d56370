//! Two-destination navigation controller.
//!
//! # Responsibility
//! - Map the list and detail destinations onto editor operations.
//! - Own the back stack with guarded pop semantics.
//!
//! # Invariants
//! - The stack is never empty; the root entry is the list screen.
//! - Opening a detail destination loads (or clears) the editor before the
//!   screen is considered current.
//! - Save/delete complete before the stack pops back to the list.

use crate::model::note::{NoteId, UNSAVED_NOTE_ID};
use crate::repo::note_repo::NoteRepository;
use crate::service::editor::{Clock, EditorError, NoteEditor, SystemClock};

/// Logical screen destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The all-notes list screen.
    List,
    /// The detail/edit screen; `note_id == 0` means a new note.
    Detail { note_id: NoteId },
}

/// Navigation controller gluing the two screens to the editor.
pub struct Router<R: NoteRepository, C: Clock = SystemClock> {
    stack: Vec<Destination>,
    editor: NoteEditor<R, C>,
}

impl<R: NoteRepository> Router<R> {
    /// Creates a router resting on the list screen.
    pub fn new(repo: R) -> Self {
        Self::with_editor(NoteEditor::new(repo))
    }
}

impl<R: NoteRepository, C: Clock> Router<R, C> {
    /// Creates a router around a pre-built editor.
    pub fn with_editor(editor: NoteEditor<R, C>) -> Self {
        Self {
            stack: vec![Destination::List],
            editor,
        }
    }

    /// The destination currently on top of the stack.
    pub fn current(&self) -> Destination {
        *self
            .stack
            .last()
            .unwrap_or(&Destination::List)
    }

    /// Navigates to the detail screen for an existing note.
    ///
    /// Returns whether the note was found; an absent id leaves the detail
    /// screen showing a fresh new-note draft.
    pub fn open_note(&mut self, id: NoteId) -> Result<bool, EditorError> {
        self.stack.push(Destination::Detail { note_id: id });
        self.editor.load(id)
    }

    /// Navigates to the detail screen with an empty new-note draft.
    pub fn open_new_note(&mut self) {
        self.editor.clear();
        self.stack.push(Destination::Detail {
            note_id: UNSAVED_NOTE_ID,
        });
    }

    /// Pops the top destination; the root list entry is never removed.
    ///
    /// Returns whether a pop happened.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Saves the draft, then navigates back.
    ///
    /// The save completes (or fails) before any navigation happens.
    pub fn save_and_back(&mut self) -> Result<NoteId, EditorError> {
        let id = self.editor.save()?;
        self.back();
        Ok(id)
    }

    /// Deletes the loaded note, then navigates back.
    pub fn delete_and_back(&mut self) -> Result<(), EditorError> {
        self.editor.delete()?;
        self.back();
        Ok(())
    }

    /// Read access to the detail screen state.
    pub fn editor(&self) -> &NoteEditor<R, C> {
        &self.editor
    }

    /// Write access to the detail screen state (draft field edits).
    pub fn editor_mut(&mut self) -> &mut NoteEditor<R, C> {
        &mut self.editor
    }
}
