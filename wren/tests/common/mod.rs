//! Fluent helpers shared by the integration tests.

#![allow(dead_code)]

use wren::{DocumentHandler, DocumentSink, EditorOptions, MemoryDocument};

pub struct Session {
    pub handler: DocumentHandler<MemoryDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        wren_log::test();
        Self {
            handler: DocumentHandler::new(MemoryDocument::new(), options),
        }
    }

    pub fn file(mut self, name: &str) -> Self {
        self.handler.switch_language(name);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.handler.load(text);
        self
    }

    pub fn caret(mut self, caret: usize) -> Self {
        self.handler.set_caret(caret);
        self
    }

    /// Type `text` at the caret one character at a time, the way key
    /// presses arrive.
    pub fn type_str(mut self, text: &str) -> Self {
        for ch in text.chars() {
            let caret = self.handler.caret();
            self.handler.insert(caret, &ch.to_string());
        }
        self
    }

    /// Insert `text` at the caret as a single edit.
    pub fn paste(mut self, text: &str) -> Self {
        let caret = self.handler.caret();
        self.handler.insert(caret, text);
        self
    }

    pub fn remove(mut self, offset: usize, len: usize) -> Self {
        self.handler.remove(offset, len);
        self
    }

    pub fn undo(mut self) -> Self {
        self.handler.undo();
        self
    }

    pub fn redo(mut self) -> Self {
        self.handler.redo();
        self
    }

    pub fn assert_text(self, expected: &str) -> Self {
        assert_eq!(self.handler.text(), expected, "buffer text");
        assert_eq!(self.handler.document().text(), expected, "document text");
        self
    }

    pub fn assert_caret(self, expected: usize) -> Self {
        assert_eq!(self.handler.caret(), expected, "buffer caret");
        assert_eq!(self.handler.document().caret(), expected, "document caret");
        self
    }

    pub fn assert_history(self, undo: usize, redo: usize) -> Self {
        assert_eq!(self.handler.history().undo_len(), undo, "undo entries");
        assert_eq!(self.handler.history().redo_len(), redo, "redo entries");
        self
    }

    pub fn assert_edited(self, edited: bool) -> Self {
        assert_eq!(self.handler.is_edited(), edited, "edited flag");
        self
    }

    pub fn document(&self) -> &MemoryDocument {
        self.handler.document()
    }

    pub fn assert_unlocked(self) -> Self {
        assert!(!self.document().is_locked(), "write lock still held");
        assert_eq!(self.document().unlocked_writes(), 0, "attribute writes outside the lock");
        self
    }

    pub fn assert_document_len(self) -> Self {
        assert_eq!(self.document().len(), self.handler.len());
        self
    }
}
