//! Delimiter pairing for insert and remove requests
//!
//! [`PairPolicy`] inspects a single edit request against the current
//! [`Buffer`] and produces the edit that should really happen:
//!
//! - Typing an opener inserts the opener and its closer, leaving the caret
//!   between them.
//! - Typing either delimiter while the caret already sits between that
//!   exact pair inserts nothing and steps over the existing closer.
//! - Deleting an opener whose partner follows immediately deletes both.
//!
//! Multi-character inserts such as pastes are never paired.

use crate::buffer::Buffer;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

const PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('\'', '\''),
    ('“', '”'),
    ('‘', '’'),
    ('`', '`'),
    ('(', ')'),
    ('（', '）'),
    ('『', '』'),
    ('「', '」'),
    ('〖', '〗'),
    ('【', '】'),
    ('[', ']'),
    ('〔', '〕'),
    ('［', '］'),
    ('{', '}'),
    ('｛', '｝'),
    ('<', '>'),
    ('《', '》'),
    ('〈', '〉'),
    ('‹', '›'),
    ('«', '»'),
];

/// Process-wide delimiter table.
pub static DELIMITER_PAIRS: LazyLock<DelimiterPairs> =
    LazyLock::new(|| DelimiterPairs::new(PAIRS));

/// Registered opening/closing delimiter pairs, indexed both ways.
///
/// Symmetric pairs such as `"` map a character to itself.
#[derive(Debug, Clone)]
pub struct DelimiterPairs {
    by_open: FxHashMap<char, char>,
    by_close: FxHashMap<char, char>,
}

impl DelimiterPairs {
    pub fn new(pairs: &[(char, char)]) -> Self {
        let mut by_open = FxHashMap::default();
        let mut by_close = FxHashMap::default();
        for &(open, close) in pairs {
            by_open.insert(open, close);
            by_close.insert(close, open);
        }
        Self { by_open, by_close }
    }

    pub fn closer(&self, open: char) -> Option<char> {
        self.by_open.get(&open).copied()
    }

    pub fn opener(&self, close: char) -> Option<char> {
        self.by_close.get(&close).copied()
    }

    pub fn len(&self) -> usize {
        self.by_open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_open.is_empty()
    }
}

/// Concrete insertion decided by [`PairPolicy::plan_insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    pub offset: usize,
    /// Text to insert; empty for a type-through.
    pub text: String,
    /// Caret adjustment applied after the insertion has shifted the caret.
    pub caret_move: isize,
}

impl InsertPlan {
    fn verbatim(offset: usize, text: String) -> Self {
        Self {
            offset,
            text,
            caret_move: 0,
        }
    }

    fn type_through(offset: usize) -> Self {
        Self {
            offset,
            text: String::new(),
            caret_move: 1,
        }
    }

    /// Nothing to insert, only a caret step over an existing delimiter.
    pub fn is_type_through(&self) -> bool {
        self.text.is_empty() && self.caret_move == 1
    }
}

/// Concrete removal decided by [`PairPolicy::plan_remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovePlan {
    pub offset: usize,
    pub len: usize,
}

/// Decides how insert and remove requests map onto buffer edits.
#[derive(Debug, Clone)]
pub struct PairPolicy {
    pairs: &'static DelimiterPairs,
    /// Replacement for a typed tab, when tabs are expanded to spaces.
    tab: Option<String>,
}

impl Default for PairPolicy {
    fn default() -> Self {
        Self::new(&DELIMITER_PAIRS)
    }
}

impl PairPolicy {
    pub fn new(pairs: &'static DelimiterPairs) -> Self {
        Self { pairs, tab: None }
    }

    /// Expand a typed tab into `tab_size` spaces.
    pub fn with_tab_expansion(mut self, tab_size: usize) -> Self {
        self.tab = Some(" ".repeat(tab_size));
        self
    }

    pub fn pairs(&self) -> &'static DelimiterPairs {
        self.pairs
    }

    /// Decide what inserting `text` at `offset` should do.
    pub fn plan_insert(&self, buffer: &Buffer, offset: usize, text: &str) -> InsertPlan {
        let text: String = text.chars().filter(|&c| c != '\r').collect();

        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return InsertPlan::verbatim(offset, text);
        };

        let before = offset.checked_sub(1).and_then(|i| buffer.char_at(i));
        let at = buffer.char_at(offset);

        if let Some(open) = self.pairs.opener(ch) {
            if before == Some(open) && at == Some(ch) {
                tracing::trace!(offset, %ch, "type-through closing delimiter");
                return InsertPlan::type_through(offset);
            }
        }

        if let Some(close) = self.pairs.closer(ch) {
            if before == Some(ch) && at == Some(close) {
                tracing::trace!(offset, %ch, "type-through opening delimiter");
                return InsertPlan::type_through(offset);
            }
            return InsertPlan {
                offset,
                text: format!("{ch}{close}"),
                caret_move: -1,
            };
        }

        match (&self.tab, ch) {
            (Some(spaces), '\t') => InsertPlan::verbatim(offset, spaces.clone()),
            _ => InsertPlan::verbatim(offset, text),
        }
    }

    /// Decide what removing `len` characters at `offset` should do.
    pub fn plan_remove(&self, buffer: &Buffer, offset: usize, len: usize) -> RemovePlan {
        if len == 1 {
            let paired = buffer
                .char_at(offset)
                .and_then(|open| self.pairs.closer(open))
                .is_some_and(|close| buffer.char_at(offset + 1) == Some(close));
            if paired {
                tracing::trace!(offset, "removing delimiter pair");
                return RemovePlan { offset, len: 2 };
            }
        }
        RemovePlan { offset, len }
    }
}
