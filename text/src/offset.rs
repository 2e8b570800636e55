//! Character/byte offset conversions.
//!
//! Public offsets in Wren count characters (Unicode scalar values), while Rust
//! strings and tree-sitter address bytes.

/// Byte offset of the character at `char_offset`.
///
/// `char_offset == char count` maps to `text.len()`.
///
/// # Panics
///
/// Panics if `char_offset` is past the end of `text`.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    if char_offset == 0 {
        return 0;
    }
    match text.char_indices().nth(char_offset) {
        Some((byte, _)) => byte,
        None => {
            let count = text.chars().count();
            assert!(
                char_offset == count,
                "char offset {char_offset} out of bounds (len {count})"
            );
            text.len()
        },
    }
}

/// Lookup table from byte offsets to character offsets.
///
/// Built once per text; every byte of a multi-byte character maps to the
/// offset of that character.
#[derive(Debug, Clone)]
pub struct ByteToChar {
    chars: Vec<usize>,
}

impl ByteToChar {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len() + 1);
        let mut count = 0;
        for ch in text.chars() {
            chars.extend(std::iter::repeat(count).take(ch.len_utf8()));
            count += 1;
        }
        chars.push(count);
        Self { chars }
    }

    /// Character offset for `byte`, saturating at the end of the text.
    pub fn get(&self, byte: usize) -> usize {
        match self.chars.get(byte) {
            Some(&offset) => offset,
            None => self.chars.last().copied().unwrap_or(0),
        }
    }
}
