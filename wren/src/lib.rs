//! Editing core for Wren
//!
//! A [`DocumentHandler`] keeps the text of one document, applies edits through
//! the delimiter pairing policy, and after every edit rehighlights the whole
//! text into a [`DocumentSink`]:
//!
//! ```text
//! edit -> PairPolicy -> Buffer + sink -> lexer / parser + annotator
//!      -> HighlightCache -> reconcile -> sink attributes
//! ```
//!
//! Visual updates are reported to the [`UndoCoordinator`] as attribute
//! events, which it never records, so one undo always reverts one user edit.

pub mod cache;
pub mod document;
pub mod handler;
pub mod memory;
pub mod options;
pub mod undo;

pub use cache::{HighlightCache, HighlightRun};
pub use document::{DocumentSink, WriteGuard};
pub use handler::DocumentHandler;
pub use memory::MemoryDocument;
pub use options::EditorOptions;
pub use undo::{
    AttributeEdit, AttributeTarget, EditEvent, EditKind, EditListener, UndoCoordinator,
    UndoableEdit,
};
pub use wren_language::Language;
