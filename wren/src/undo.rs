//! Undo history for content edits
//!
//! Every mutation of a document is reported as an [`EditEvent`]. Content
//! edits are undoable; attribute edits (recoloring, paragraph formatting) are
//! recomputed after every content change and never enter the history.

use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Remove,
}

/// A content change, with enough text to apply its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoableEdit {
    pub offset: usize,
    pub kind: EditKind,
    /// Inserted or removed text.
    pub text: String,
}

impl UndoableEdit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            kind: EditKind::Insert,
            text: text.into(),
        }
    }

    pub fn remove(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            kind: EditKind::Remove,
            text: text.into(),
        }
    }

    /// Length of the affected text, in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            EditKind::Insert => EditKind::Remove,
            EditKind::Remove => EditKind::Insert,
        };
        Self {
            offset: self.offset,
            kind,
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    Character,
    Paragraph,
}

/// An attribute-only change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeEdit {
    pub offset: usize,
    pub len: usize,
    pub target: AttributeTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Content(UndoableEdit),
    Attribute(AttributeEdit),
}

impl EditEvent {
    pub fn dispatch(self, listener: &mut dyn EditListener) {
        match self {
            EditEvent::Content(edit) => listener.content_edited(edit),
            EditEvent::Attribute(edit) => listener.attributes_changed(&edit),
        }
    }
}

pub trait EditListener {
    fn content_edited(&mut self, edit: UndoableEdit);

    fn attributes_changed(&mut self, _edit: &AttributeEdit) {}
}

/// Undo and redo stacks of content edits, capped at a configured limit.
#[derive(Debug)]
pub struct UndoCoordinator {
    undo_stack: VecDeque<UndoableEdit>,
    redo_stack: VecDeque<UndoableEdit>,
    limit: usize,
    edited: bool,
}

impl UndoCoordinator {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            limit,
            edited: false,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the cap, dropping the oldest edits if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        while self.undo_stack.len() > limit {
            self.undo_stack.pop_front();
        }
        while self.redo_stack.len() > limit {
            self.redo_stack.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Content changed since the last [`UndoCoordinator::mark_saved`].
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn mark_saved(&mut self) {
        self.edited = false;
    }

    /// Forget all history and clear the edited flag.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.edited = false;
    }

    /// Move the latest edit to the redo stack and return the edit that
    /// reverts it.
    pub fn take_undo(&mut self) -> Option<UndoableEdit> {
        let edit = self.undo_stack.pop_back()?;
        let inverse = edit.inverse();
        push_capped(&mut self.redo_stack, edit, self.limit);
        self.edited = true;
        Some(inverse)
    }

    /// Move the latest undone edit back to the undo stack and return it for
    /// replay.
    pub fn take_redo(&mut self) -> Option<UndoableEdit> {
        let edit = self.redo_stack.pop_back()?;
        push_capped(&mut self.undo_stack, edit.clone(), self.limit);
        self.edited = true;
        Some(edit)
    }
}

fn push_capped(stack: &mut VecDeque<UndoableEdit>, edit: UndoableEdit, limit: usize) {
    if limit == 0 {
        return;
    }
    if stack.len() >= limit {
        stack.pop_front();
    }
    stack.push_back(edit);
}

impl EditListener for UndoCoordinator {
    fn content_edited(&mut self, edit: UndoableEdit) {
        debug!(offset = edit.offset, kind = ?edit.kind, len = edit.char_len(), "recorded edit");
        push_capped(&mut self.undo_stack, edit, self.limit);
        self.redo_stack.clear();
        self.edited = true;
    }

    fn attributes_changed(&mut self, edit: &AttributeEdit) {
        trace!(offset = edit.offset, len = edit.len, target = ?edit.target, "attribute edit not recorded");
    }
}
