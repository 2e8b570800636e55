//! The rendering surface a [`crate::DocumentHandler`] mirrors its text into.

use std::ops::{Deref, DerefMut};
use wren_config::{ParagraphStyle, Style};

/// A visual document kept in sync with the handler's buffer.
///
/// Offsets are character offsets. Implementations may panic on out of range
/// offsets; the handler never issues them.
pub trait DocumentSink {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn caret(&self) -> usize;
    fn set_caret(&mut self, caret: usize);

    fn insert(&mut self, offset: usize, text: &str);
    fn remove(&mut self, offset: usize, len: usize);

    /// Restyle `len` characters at `offset`. With `replace` the previous
    /// style is discarded rather than merged.
    fn change_character_attributes(&mut self, offset: usize, len: usize, style: Style, replace: bool);

    fn change_paragraph_attributes(&mut self, offset: usize, len: usize, style: ParagraphStyle);

    fn lock_write(&mut self);
    fn unlock_write(&mut self);

    /// The document now has `count` lines.
    fn reset_line_numbers(&mut self, count: usize);

    /// Short status text for the user.
    fn message(&mut self, text: &str);
}

/// Holds the write lock of a [`DocumentSink`] until dropped.
pub struct WriteGuard<'a, D: DocumentSink + ?Sized> {
    document: &'a mut D,
}

impl<'a, D: DocumentSink + ?Sized> WriteGuard<'a, D> {
    pub fn new(document: &'a mut D) -> Self {
        document.lock_write();
        Self { document }
    }
}

impl<D: DocumentSink + ?Sized> Deref for WriteGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.document
    }
}

impl<D: DocumentSink + ?Sized> DerefMut for WriteGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.document
    }
}

impl<D: DocumentSink + ?Sized> Drop for WriteGuard<'_, D> {
    fn drop(&mut self) {
        self.document.unlock_write();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn guard_unlocks_on_drop() {
        let mut document = MemoryDocument::new();
        {
            let guard = WriteGuard::new(&mut document);
            assert!(guard.is_locked());
        }
        assert!(!document.is_locked());
        assert_eq!(document.lock_count(), 1);
    }

    #[test]
    fn guard_unlocks_while_unwinding() {
        let mut document = MemoryDocument::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut guard = WriteGuard::new(&mut document);
            // Out of range: the document panics.
            guard.change_character_attributes(5, 1, Style::default(), true);
        }));
        assert!(result.is_err());
        assert!(!document.is_locked());
    }
}
