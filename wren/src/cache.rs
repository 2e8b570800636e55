//! Per-character highlight cache
//!
//! The lexical and semantic passes paint into the cache; [`HighlightCache::reconcile`]
//! turns the painted slots into as few attribute changes on the document as
//! possible and leaves every slot empty again.

use crate::document::{DocumentSink, WriteGuard};
use tracing::{trace, warn};
use wren_config::Style;
use wren_language::HighlightSink;

/// One attribute change issued by [`HighlightCache::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRun {
    pub start: usize,
    pub len: usize,
    pub style: Style,
}

/// One slot per character of the document, plus one trailing slot.
#[derive(Debug, Default)]
pub struct HighlightCache {
    slots: Vec<Option<Style>>,
}

impl HighlightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the cache for a document of `len` characters.
    pub fn ensure_len(&mut self, len: usize) {
        self.slots.resize(len + 1, None);
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when no slot holds a style.
    pub fn is_drained(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, offset: usize) -> Option<Style> {
        self.slots.get(offset).copied().flatten()
    }

    /// Assign `style` to `start..end`. Later calls overwrite earlier ones.
    pub fn highlight(&mut self, start: usize, end: usize, style: Style) {
        if start >= end {
            return;
        }
        let limit = self.slots.len();
        if end > limit {
            warn!(start, end, len = limit, "highlight past the end of the cache, clamping");
        }
        let end = end.min(limit);
        let start = start.min(end);
        self.slots[start..end].fill(Some(style));
    }

    /// Issue one `change_character_attributes` per maximal run of equal,
    /// non-empty slots, emptying every slot on the way.
    ///
    /// The document's write lock is held for the whole pass. Runs are
    /// clipped to the document's length.
    pub fn reconcile<D: DocumentSink + ?Sized>(&mut self, document: &mut D) -> Vec<HighlightRun> {
        let mut document = WriteGuard::new(document);
        let doc_len = document.len();
        let mut runs = Vec::new();

        let mut offset = 0;
        while offset < self.slots.len() {
            let start = offset;
            let value = self.slots[offset].take();
            offset += 1;
            while offset < self.slots.len() && self.slots[offset] == value {
                self.slots[offset] = None;
                offset += 1;
            }

            let Some(style) = value else { continue };
            let end = offset.min(doc_len);
            if start >= end {
                continue;
            }
            document.change_character_attributes(start, end - start, style, true);
            runs.push(HighlightRun {
                start,
                len: end - start,
                style,
            });
        }

        trace!(runs = runs.len(), "reconciled highlight cache");
        runs
    }
}

impl HighlightSink for HighlightCache {
    fn highlight(&mut self, start: usize, end: usize, style: Style) {
        HighlightCache::highlight(self, start, end, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;

    const RED: Style = Style::fg(0xff0000);
    const BLUE: Style = Style::fg(0x0000ff);

    fn document(text: &str) -> MemoryDocument {
        MemoryDocument::with_text(text)
    }

    #[test]
    fn empty_range_is_ignored() {
        let mut cache = HighlightCache::new();
        cache.ensure_len(4);
        cache.highlight(2, 2, RED);
        cache.highlight(3, 1, RED);
        assert!(cache.is_drained());
    }

    #[test]
    fn later_calls_win() {
        let mut cache = HighlightCache::new();
        cache.ensure_len(6);
        cache.highlight(0, 6, RED);
        cache.highlight(2, 4, BLUE);
        assert_eq!(cache.get(1), Some(RED));
        assert_eq!(cache.get(2), Some(BLUE));
        assert_eq!(cache.get(4), Some(RED));
    }

    #[test]
    fn reconcile_groups_runs() {
        let mut doc = document("abcdef");
        let mut cache = HighlightCache::new();
        cache.ensure_len(6);
        cache.highlight(0, 2, RED);
        cache.highlight(2, 3, RED);
        cache.highlight(4, 6, BLUE);

        let runs = cache.reconcile(&mut doc);
        assert_eq!(
            runs,
            vec![
                HighlightRun {
                    start: 0,
                    len: 3,
                    style: RED
                },
                HighlightRun {
                    start: 4,
                    len: 2,
                    style: BLUE
                },
            ]
        );
        assert_eq!(doc.character_calls(), 2);
        assert_eq!(doc.style_at(3), None);
        assert_eq!(doc.style_at(5), Some(BLUE));
    }

    #[test]
    fn reconcile_drains() {
        let mut doc = document("abc");
        let mut cache = HighlightCache::new();
        cache.ensure_len(3);
        cache.highlight(0, 3, RED);
        cache.reconcile(&mut doc);
        assert!(cache.is_drained());

        let calls = doc.character_calls();
        assert!(cache.reconcile(&mut doc).is_empty());
        assert_eq!(doc.character_calls(), calls);
    }

    #[test]
    fn reconcile_holds_one_lock() {
        let mut doc = document("abcdef");
        let mut cache = HighlightCache::new();
        cache.ensure_len(6);
        cache.highlight(0, 1, RED);
        cache.highlight(3, 4, BLUE);
        cache.reconcile(&mut doc);
        assert_eq!(doc.lock_count(), 1);
        assert_eq!(doc.unlocked_writes(), 0);
        assert!(!doc.is_locked());
    }

    #[test]
    fn past_the_end_is_clamped() {
        let mut doc = document("ab");
        let mut cache = HighlightCache::new();
        cache.ensure_len(2);
        cache.highlight(1, 10, RED);
        let runs = cache.reconcile(&mut doc);
        assert_eq!(
            runs,
            vec![HighlightRun {
                start: 1,
                len: 1,
                style: RED
            }]
        );
        assert!(cache.is_drained());
    }
}
