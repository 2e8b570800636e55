//! Semantic annotation of syntax trees
//!
//! An [`Annotator`] looks at one node at a time, together with whatever
//! context it can reach through the node's parent and siblings, and reports
//! styled ranges to a [`HighlightSink`]. The walk itself lives in
//! [`annotate_tree`].

use crate::syntax::{SyntaxNode, SyntaxTree};
use std::ops::Range;
use wren_config::{ColorScheme, HighlightCategory, Style};

pub(crate) mod java;
pub(crate) mod kotlin;

/// Receives styled character ranges.
pub trait HighlightSink {
    fn highlight(&mut self, start: usize, end: usize, style: Style);
}

pub trait Annotator: Sync {
    fn annotate(&self, node: SyntaxNode<'_>, sink: &mut dyn HighlightSink, scheme: &ColorScheme);
}

/// Call `annotator` for every node of `tree` in preorder, skipping
/// whitespace leaves.
pub fn annotate_tree(
    annotator: &dyn Annotator,
    tree: &SyntaxTree,
    sink: &mut dyn HighlightSink,
    scheme: &ColorScheme,
) {
    for node in tree.preorder().filter(|node| !node.is_whitespace()) {
        annotator.annotate(node, sink, scheme);
    }
}

pub(crate) fn paint(
    sink: &mut dyn HighlightSink,
    scheme: &ColorScheme,
    range: Range<usize>,
    category: HighlightCategory,
) {
    sink.highlight(range.start, range.end, scheme.style(category));
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::Language;

    /// Records every highlight call.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) calls: Vec<(Range<usize>, Style)>,
    }

    impl HighlightSink for Recorder {
        fn highlight(&mut self, start: usize, end: usize, style: Style) {
            self.calls.push((start..end, style));
        }
    }

    /// Annotate `text` and return the style of the last call covering
    /// exactly the first occurrence of `needle`.
    pub(crate) fn style_of(language: Language, text: &str, needle: &str) -> Option<Style> {
        let byte = text.find(needle)?;
        let start = text[..byte].chars().count();
        let range = start..start + needle.chars().count();
        annotate(language, text)
            .into_iter()
            .rev()
            .find(|(r, _)| *r == range)
            .map(|(_, style)| style)
    }

    pub(crate) fn expected(category: HighlightCategory) -> Option<Style> {
        Some(ColorScheme::default().style(category))
    }

    pub(crate) fn annotate(language: Language, text: &str) -> Vec<(Range<usize>, Style)> {
        let tree = language.parser().unwrap().parse(text).unwrap();
        let mut recorder = Recorder::default();
        annotate_tree(
            language.annotator(),
            &tree,
            &mut recorder,
            &ColorScheme::default(),
        );
        recorder.calls
    }
}
