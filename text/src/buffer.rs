//! Character-addressed text buffer
//!
//! [`Buffer`] is the self-maintained copy of a document's text. Rendering
//! surfaces keep their own representation; the buffer is what the lexer,
//! parser and edit policy read from.

use crate::offset::char_to_byte;
use std::ops::Range;

/// Canonical document text plus caret.
///
/// All offsets are character offsets. Out-of-range offsets are contract
/// violations and panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    /// Cached `text.chars().count()`
    len: usize,
    caret: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            len: text.chars().count(),
            caret: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret.
    ///
    /// # Panics
    ///
    /// Panics if `caret > len()`.
    pub fn set_caret(&mut self, caret: usize) {
        assert!(
            caret <= self.len,
            "caret {caret} out of bounds (len {})",
            self.len
        );
        self.caret = caret;
    }

    /// Move the caret by `delta`, clamped to the buffer.
    pub fn move_caret(&mut self, delta: isize) {
        self.caret = self.caret.saturating_add_signed(delta).min(self.len);
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Text of the character range `range`.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = char_to_byte(&self.text, range.start);
        let end = start + char_to_byte(&self.text[start..], range.end - range.start);
        &self.text[start..end]
    }

    /// Insert `text` at `offset`, shifting the caret if it sits at or after
    /// the insertion point.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn insert(&mut self, offset: usize, text: &str) {
        assert!(
            offset <= self.len,
            "insert offset {offset} out of bounds (len {})",
            self.len
        );
        let inserted = text.chars().count();
        let byte = char_to_byte(&self.text, offset);
        self.text.insert_str(byte, text);
        self.len += inserted;
        if self.caret >= offset {
            self.caret += inserted;
        }
    }

    /// Remove `len` characters starting at `offset` and return them.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the buffer.
    pub fn remove(&mut self, offset: usize, len: usize) -> String {
        let end = offset + len;
        assert!(
            end <= self.len,
            "remove range {offset}..{end} out of bounds (len {})",
            self.len
        );
        let start_byte = char_to_byte(&self.text, offset);
        let end_byte = start_byte + char_to_byte(&self.text[start_byte..], len);
        let removed: String = self.text.drain(start_byte..end_byte).collect();
        self.len -= len;
        if self.caret > end {
            self.caret -= len;
        } else if self.caret > offset {
            self.caret = offset;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len = 0;
        self.caret = 0;
    }

    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Offset of the first `ch` at or after `from`.
    pub fn find_char(&self, ch: char, from: usize) -> Option<usize> {
        self.text
            .chars()
            .skip(from)
            .position(|c| c == ch)
            .map(|index| index + from)
    }

    /// Offset of the last `ch` strictly before `before`.
    pub fn rfind_char(&self, ch: char, before: usize) -> Option<usize> {
        self.text
            .chars()
            .take(before)
            .enumerate()
            .filter(|&(_, c)| c == ch)
            .map(|(index, _)| index)
            .last()
    }

    /// Character range of the line containing `offset`, excluding the newline.
    pub fn line_range(&self, offset: usize) -> Range<usize> {
        let start = self.rfind_char('\n', offset).map_or(0, |index| index + 1);
        let end = self.find_char('\n', offset).unwrap_or(self.len);
        start..end
    }
}
