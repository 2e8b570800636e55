use crate::document::DocumentSink;
use wren_config::{ParagraphStyle, Style};

/// A [`DocumentSink`] that keeps everything in memory.
///
/// Stores one style per character and counts the calls it receives, which
/// makes it the surface of choice for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    chars: Vec<char>,
    styles: Vec<Option<Style>>,
    caret: usize,
    paragraph_style: Option<ParagraphStyle>,
    line_numbers: usize,
    messages: Vec<String>,
    lock_depth: usize,
    lock_count: usize,
    character_calls: usize,
    paragraph_calls: usize,
    unlocked_writes: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document already holding `text`, unstyled.
    pub fn with_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            styles: vec![None; chars.len()],
            chars,
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.styles.get(offset).copied().flatten()
    }

    pub fn styles(&self) -> &[Option<Style>] {
        &self.styles
    }

    pub fn paragraph_style(&self) -> Option<ParagraphStyle> {
        self.paragraph_style
    }

    /// Line count from the last [`DocumentSink::reset_line_numbers`].
    pub fn line_numbers(&self) -> usize {
        self.line_numbers
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_locked(&self) -> bool {
        self.lock_depth > 0
    }

    /// Times the write lock was taken.
    pub fn lock_count(&self) -> usize {
        self.lock_count
    }

    pub fn character_calls(&self) -> usize {
        self.character_calls
    }

    pub fn paragraph_calls(&self) -> usize {
        self.paragraph_calls
    }

    /// Attribute changes made without holding the write lock.
    pub fn unlocked_writes(&self) -> usize {
        self.unlocked_writes
    }

    fn check_range(&self, offset: usize, len: usize) {
        assert!(
            offset + len <= self.chars.len(),
            "range {offset}..{} out of bounds (len {})",
            offset + len,
            self.chars.len()
        );
    }
}

impl DocumentSink for MemoryDocument {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, caret: usize) {
        assert!(caret <= self.chars.len(), "caret {caret} out of bounds");
        self.caret = caret;
    }

    fn insert(&mut self, offset: usize, text: &str) {
        self.check_range(offset, 0);
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.chars.splice(offset..offset, inserted);
        self.styles
            .splice(offset..offset, std::iter::repeat(None).take(count));
        if self.caret >= offset {
            self.caret += count;
        }
    }

    fn remove(&mut self, offset: usize, len: usize) {
        self.check_range(offset, len);
        self.chars.drain(offset..offset + len);
        self.styles.drain(offset..offset + len);
        if self.caret > offset + len {
            self.caret -= len;
        } else if self.caret > offset {
            self.caret = offset;
        }
    }

    fn change_character_attributes(&mut self, offset: usize, len: usize, style: Style, replace: bool) {
        self.check_range(offset, len);
        self.character_calls += 1;
        if !self.is_locked() {
            self.unlocked_writes += 1;
        }
        for slot in &mut self.styles[offset..offset + len] {
            *slot = match (*slot, replace) {
                (Some(old), false) => Some(style.over(old)),
                _ => Some(style),
            };
        }
    }

    fn change_paragraph_attributes(&mut self, offset: usize, len: usize, style: ParagraphStyle) {
        self.check_range(offset, len);
        self.paragraph_calls += 1;
        if !self.is_locked() {
            self.unlocked_writes += 1;
        }
        self.paragraph_style = Some(style);
    }

    fn lock_write(&mut self) {
        self.lock_depth += 1;
        self.lock_count += 1;
    }

    fn unlock_write(&mut self) {
        assert!(self.lock_depth > 0, "unlock_write without lock_write");
        self.lock_depth -= 1;
    }

    fn reset_line_numbers(&mut self, count: usize) {
        self.line_numbers = count;
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_keep_styles_aligned() {
        let red = Style::fg(0xff0000);
        let mut doc = MemoryDocument::with_text("abcd");
        doc.change_character_attributes(0, 4, red, true);
        doc.insert(2, "xy");
        assert_eq!(doc.text(), "abxycd");
        assert_eq!(doc.style_at(2), None);
        assert_eq!(doc.style_at(4), Some(red));

        doc.remove(1, 2);
        assert_eq!(doc.text(), "aycd");
        assert_eq!(doc.styles().len(), 4);
        assert_eq!(doc.style_at(1), None);
        assert_eq!(doc.unlocked_writes(), 1);
    }

    #[test]
    fn merge_without_replace() {
        let mut doc = MemoryDocument::with_text("a");
        doc.change_character_attributes(0, 1, Style::fg(0x111111), true);
        doc.change_character_attributes(0, 1, Style::default().bold(), false);
        let style = doc.style_at(0).unwrap();
        assert!(style.bold);
        assert!(style.foreground.is_some());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_panics() {
        let mut doc = MemoryDocument::with_text("ab");
        doc.remove(1, 5);
    }
}
