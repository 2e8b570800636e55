//! The edit and reparse pipeline
//!
//! [`DocumentHandler`] owns the canonical text of one document and mirrors
//! every change into a [`DocumentSink`]. Each content edit runs, in order:
//!
//! 1. the edit against the buffer and the sink
//! 2. the caret move the pairing policy asked for
//! 3. a content [`EditEvent`] to the undo history
//! 4. the lexical pass over the whole text, if enabled
//! 5. the semantic pass over a fresh syntax tree, if enabled
//! 6. reconciliation of the highlight cache into the sink
//! 7. paragraph formatting of the touched lines and the line-number gutter
//!
//! Steps 6 and 7 report attribute events, which the history ignores. Undo and
//! redo replay content edits through the same raw path, without pairing and
//! without recording, and then run steps 4 to 7.

use crate::{
    cache::{HighlightCache, HighlightRun},
    document::{DocumentSink, WriteGuard},
    options::EditorOptions,
    undo::{
        AttributeEdit, AttributeTarget, EditEvent, EditKind, UndoCoordinator, UndoableEdit,
    },
};
use std::ops::Range;
use tracing::{debug, trace, warn};
use wren_language::{annotate_tree, Language, ParseError, SyntaxParser, SyntaxTree};
use wren_text::{Buffer, PairPolicy};

pub struct DocumentHandler<D: DocumentSink> {
    document: D,
    buffer: Buffer,
    policy: PairPolicy,
    options: EditorOptions,
    cache: HighlightCache,
    undo: UndoCoordinator,
    language: Option<Language>,
    parser: Option<Box<dyn SyntaxParser>>,
    /// Tree from the latest semantic pass, dropped on the next edit.
    tree: Option<SyntaxTree>,
    line_count: usize,
}

impl<D: DocumentSink> DocumentHandler<D> {
    /// Take over `document`, which must be empty.
    pub fn new(mut document: D, options: EditorOptions) -> Self {
        assert!(
            document.is_empty(),
            "a document handler must start from an empty document"
        );
        document.reset_line_numbers(1);
        Self {
            document,
            buffer: Buffer::new(),
            policy: options.pair_policy(),
            undo: UndoCoordinator::new(options.undo_limit),
            options,
            cache: HighlightCache::new(),
            language: None,
            parser: None,
            tree: None,
            line_count: 1,
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.buffer.caret()
    }

    /// # Panics
    ///
    /// Panics if `caret > len()`.
    pub fn set_caret(&mut self, caret: usize) {
        self.buffer.set_caret(caret);
        self.document.set_caret(caret);
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn history(&self) -> &UndoCoordinator {
        &self.undo
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Content changed since the last load or [`DocumentHandler::mark_saved`].
    pub fn is_edited(&self) -> bool {
        self.undo.is_edited()
    }

    pub fn mark_saved(&mut self) {
        self.undo.mark_saved();
    }

    /// Select the language for `file_name`, or none, and rehighlight.
    pub fn switch_language(&mut self, file_name: &str) -> Option<Language> {
        let language = Language::detect(file_name);
        debug!(file_name, language = language.map(|l| l.name()), "switched language");
        self.set_language(language);
        language
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        if self.language != language {
            self.language = language;
            self.parser = None;
        }
        self.reparse();
    }

    /// Apply new options, reformat every line and rehighlight.
    pub fn reload(&mut self, options: EditorOptions) {
        self.policy = options.pair_policy();
        self.undo.set_limit(options.undo_limit);
        self.options = options;
        self.reparse();
        self.adjust_format(0..self.buffer.len());
    }

    /// Insert `text` at `offset`, letting the pairing policy decide what is
    /// actually inserted.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let at_caret = offset == self.buffer.caret();
        let plan = self.policy.plan_insert(&self.buffer, offset, text);
        if plan.is_type_through() {
            if at_caret {
                self.move_caret(plan.caret_move);
            }
            return;
        }
        if plan.text.is_empty() {
            return;
        }

        let edit = UndoableEdit::insert(plan.offset, plan.text);
        self.apply(&edit);
        if at_caret && plan.caret_move != 0 {
            self.move_caret(plan.caret_move);
        }
        self.finish_edit(edit);
    }

    /// Remove `len` characters at `offset`, widened to a whole delimiter pair
    /// when the policy says so.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the text.
    pub fn remove(&mut self, offset: usize, len: usize) {
        let plan = self.policy.plan_remove(&self.buffer, offset, len);
        if plan.len == 0 {
            return;
        }
        let removed = self
            .buffer
            .slice(plan.offset..plan.offset + plan.len)
            .to_owned();
        let edit = UndoableEdit::remove(plan.offset, removed);
        self.apply(&edit);
        self.finish_edit(edit);
    }

    /// Remove all text as one undoable edit.
    pub fn clear(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let edit = UndoableEdit::remove(0, self.buffer.text());
        self.apply(&edit);
        self.finish_edit(edit);
    }

    /// Replace the whole text without recording history. The document counts
    /// as unedited afterwards.
    pub fn load(&mut self, text: &str) {
        let text: String = text.chars().filter(|&c| c != '\r').collect();
        if !self.buffer.is_empty() {
            self.apply(&UndoableEdit::remove(0, self.buffer.text()));
        }
        if !text.is_empty() {
            self.apply(&UndoableEdit::insert(0, text));
        }
        self.set_caret(0);
        self.undo.reset();
        debug!(len = self.buffer.len(), "loaded text");
        self.reparse();
        self.adjust_format(0..self.buffer.len());
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Revert the latest content edit. Does nothing without history.
    pub fn undo(&mut self) {
        if !self.undo.can_undo() {
            return;
        }
        if let Some(edit) = self.undo.take_undo() {
            self.replay(&edit);
        }
    }

    /// Reapply the latest undone edit. Does nothing without history.
    pub fn redo(&mut self) {
        if !self.undo.can_redo() {
            return;
        }
        if let Some(edit) = self.undo.take_redo() {
            self.replay(&edit);
        }
    }

    /// Open a new line after the caret's line and move there.
    pub fn next_line(&mut self) {
        self.document.message("Started new line");
        let end = self.buffer.line_range(self.buffer.caret()).end;
        self.insert(end, "\n");
        self.set_caret(end + 1);
    }

    /// Break the line at the caret, leaving the caret where it was.
    pub fn split_line(&mut self) {
        self.document.message("Split new line");
        let caret = self.buffer.caret();
        self.insert(caret, "\n");
        self.set_caret(caret);
    }

    /// Open a new line above the caret's line and move there.
    pub fn new_line_before_current(&mut self) {
        self.document.message("Started new line before current line");
        let start = self.buffer.line_range(self.buffer.caret()).start;
        self.insert(start, "\n");
        self.set_caret(start);
    }

    /// Add or remove a line comment marker at the start of the caret's line.
    pub fn toggle_line_comment(&mut self) {
        let marker = self.language.unwrap_or(Language::Kotlin).line_comment();
        let line = self.buffer.line_range(self.buffer.caret());
        let marker_len = marker.chars().count();
        let commented = line.len() >= marker_len
            && self.buffer.slice(line.start..line.start + marker_len) == marker;
        if commented {
            self.remove(line.start, marker_len);
        } else {
            self.insert(line.start, marker);
        }
    }

    /// Tree from the latest semantic pass, or a fresh parse of the current
    /// text when there is none.
    pub fn syntax_tree(&mut self) -> Option<&SyntaxTree> {
        if self.tree.is_none() {
            let language = self.language?;
            match self.parse(language) {
                Ok(tree) => self.tree = Some(tree),
                Err(error) => {
                    warn!(%error, "failed to parse current file");
                    return None;
                },
            }
        }
        self.tree.as_ref()
    }

    /// Run the lexical and semantic passes over the whole text and reconcile
    /// the result into the document.
    pub fn reparse(&mut self) -> Vec<HighlightRun> {
        self.tree = None;
        self.cache.ensure_len(self.buffer.len());

        if let Some(language) = self.language {
            if self.options.token_highlighting {
                for token in language.lexer(self.buffer.text()) {
                    if let Some(style) = language.attributes_of(token.kind, &self.options.colors) {
                        self.cache.highlight(token.start, token.end, style);
                    }
                }
            }

            if self.options.semantic_highlighting {
                match self.parse(language) {
                    Ok(tree) => {
                        annotate_tree(
                            language.annotator(),
                            &tree,
                            &mut self.cache,
                            &self.options.colors,
                        );
                        self.tree = Some(tree);
                    },
                    Err(error) => {
                        warn!(%error, language = language.name(), "skipping semantic highlighting");
                    },
                }
            }
        }

        let runs = self.cache.reconcile(&mut self.document);
        for run in &runs {
            EditEvent::Attribute(AttributeEdit {
                offset: run.start,
                len: run.len,
                target: AttributeTarget::Character,
            })
            .dispatch(&mut self.undo);
        }
        trace!(runs = runs.len(), "reparsed");
        runs
    }

    fn parse(&mut self, language: Language) -> Result<SyntaxTree, ParseError> {
        if self
            .parser
            .as_ref()
            .is_some_and(|parser| parser.language() != language)
        {
            self.parser = None;
        }
        let mut parser = match self.parser.take() {
            Some(parser) => parser,
            None => language.parser()?,
        };
        let tree = parser.parse(self.buffer.text());
        self.parser = Some(parser);
        tree
    }

    fn move_caret(&mut self, delta: isize) {
        self.buffer.move_caret(delta);
        self.document.set_caret(self.buffer.caret());
    }

    /// Apply `edit` to the buffer and the document, nothing else.
    fn apply(&mut self, edit: &UndoableEdit) {
        match edit.kind {
            EditKind::Insert => {
                self.buffer.insert(edit.offset, &edit.text);
                self.document.insert(edit.offset, &edit.text);
            },
            EditKind::Remove => {
                let len = edit.char_len();
                self.buffer.remove(edit.offset, len);
                self.document.remove(edit.offset, len);
            },
        }
        self.document.set_caret(self.buffer.caret());
    }

    fn finish_edit(&mut self, edit: UndoableEdit) {
        let touched = touched_range(&edit);
        EditEvent::Content(edit).dispatch(&mut self.undo);
        self.reparse();
        self.adjust_format(touched);
    }

    fn replay(&mut self, edit: &UndoableEdit) {
        debug!(offset = edit.offset, kind = ?edit.kind, "replaying edit");
        self.apply(edit);
        let caret = match edit.kind {
            EditKind::Insert => edit.offset + edit.char_len(),
            EditKind::Remove => edit.offset,
        };
        self.set_caret(caret);
        self.reparse();
        self.adjust_format(touched_range(edit));
    }

    /// Reapply paragraph formatting to the lines around `range` and refresh
    /// the line numbers when the line count changed.
    fn adjust_format(&mut self, range: Range<usize>) {
        let len = self.buffer.len();
        let start = self.buffer.line_range(range.start.min(len)).start;
        let end = self.buffer.line_range(range.end.min(len)).end;
        if start < end {
            let style = self.options.paragraph_style();
            WriteGuard::new(&mut self.document).change_paragraph_attributes(
                start,
                end - start,
                style,
            );
            EditEvent::Attribute(AttributeEdit {
                offset: start,
                len: end - start,
                target: AttributeTarget::Paragraph,
            })
            .dispatch(&mut self.undo);
        }

        let line_count = self.buffer.line_count();
        if line_count != self.line_count {
            self.line_count = line_count;
            self.document.reset_line_numbers(line_count);
        }
    }
}

/// Character range of the text after `edit` that it touched.
fn touched_range(edit: &UndoableEdit) -> Range<usize> {
    match edit.kind {
        EditKind::Insert => edit.offset..edit.offset + edit.char_len(),
        EditKind::Remove => edit.offset..edit.offset,
    }
}
