//! A [`DocumentSink`] that renders to ANSI escape sequences.

use std::fmt::Write as _;
use wren::DocumentSink;
use wren_config::{Color, ParagraphStyle, Style};

const RESET: &str = "\x1b[0m";

#[derive(Debug, Default)]
pub struct TerminalDocument {
    chars: Vec<char>,
    styles: Vec<Option<Style>>,
    caret: usize,
    tab_size: Option<usize>,
    line_count: usize,
    messages: Vec<String>,
    locked: usize,
}

impl TerminalDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The text with one SGR sequence per style change, tabs expanded to
    /// the paragraph tab size and an optional line-number gutter.
    pub fn render(&self, line_numbers: bool) -> String {
        let gutter_width = self.line_count.max(1).to_string().len();
        let mut out = String::new();
        let mut current: Option<Style> = None;
        let mut column = 0;
        let mut line = 1;

        if line_numbers && !self.chars.is_empty() {
            let _ = write!(out, "{line:>gutter_width$} ");
        }
        for (&ch, &style) in self.chars.iter().zip(&self.styles) {
            if style != current {
                out.push_str(RESET);
                if let Some(style) = style {
                    out.push_str(&sgr(style));
                }
                current = style;
            }
            match ch {
                '\n' => {
                    if current.is_some() {
                        out.push_str(RESET);
                        current = None;
                    }
                    out.push('\n');
                    column = 0;
                    line += 1;
                    if line_numbers {
                        let _ = write!(out, "{line:>gutter_width$} ");
                    }
                },
                '\t' => {
                    let tab = self.tab_size.unwrap_or(4).max(1);
                    let spaces = tab - column % tab;
                    out.extend(std::iter::repeat(' ').take(spaces));
                    column += spaces;
                },
                _ => {
                    out.push(ch);
                    column += 1;
                },
            }
        }
        if current.is_some() {
            out.push_str(RESET);
        }
        out
    }
}

fn sgr(style: Style) -> String {
    let mut codes: Vec<String> = Vec::new();
    if style.bold {
        codes.push("1".into());
    }
    if style.italic {
        codes.push("3".into());
    }
    if style.underline {
        codes.push("4".into());
    }
    if let Some(Color { r, g, b }) = style.foreground {
        codes.push(format!("38;2;{r};{g};{b}"));
    }
    if let Some(Color { r, g, b }) = style.background {
        codes.push(format!("48;2;{r};{g};{b}"));
    }
    format!("\x1b[{}m", codes.join(";"))
}

impl DocumentSink for TerminalDocument {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.chars.len());
    }

    fn insert(&mut self, offset: usize, text: &str) {
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
        self.chars.drain(offset..offset + len);
        self.styles.drain(offset..offset + len);
        self.caret = self.caret.min(self.chars.len());
    }

    fn change_character_attributes(&mut self, offset: usize, len: usize, style: Style, replace: bool) {
        for slot in &mut self.styles[offset..offset + len] {
            *slot = match (*slot, replace) {
                (Some(old), false) => Some(style.over(old)),
                _ => Some(style),
            };
        }
    }

    fn change_paragraph_attributes(&mut self, _offset: usize, _len: usize, style: ParagraphStyle) {
        self.tab_size = Some(style.tab_size);
    }

    fn lock_write(&mut self) {
        self.locked += 1;
    }

    fn unlock_write(&mut self) {
        self.locked = self.locked.saturating_sub(1);
    }

    fn reset_line_numbers(&mut self, count: usize) {
        self.line_count = count;
    }

    fn message(&mut self, text: &str) {
        tracing::debug!(message = text, "document message");
        self.messages.push(text.to_owned());
    }
}
