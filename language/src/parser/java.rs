//! Conversion from tree-sitter-java trees to [`SyntaxTree`]

use crate::{
    parser::{NoTreeSnafu, ParseError, SyntaxParser},
    syntax::{SyntaxTree, TreeBuilder},
    Language,
};
use snafu::OptionExt;
use tracing::trace;
use tree_sitter::{Parser as TsParser, TreeCursor};
use wren_text::offset::ByteToChar;

pub(crate) struct JavaParser {
    parser: TsParser,
}

impl JavaParser {
    pub(crate) fn new() -> Result<Self, ParseError> {
        let mut parser = TsParser::new();
        parser
            .set_language(tree_sitter_java::language())
            .map_err(|_| ParseError::Grammar {
                language: Language::Java,
            })?;
        Ok(Self { parser })
    }
}

impl SyntaxParser for JavaParser {
    fn language(&self) -> Language {
        Language::Java
    }

    fn parse(&mut self, text: &str) -> Result<SyntaxTree, ParseError> {
        let tree = self.parser.parse(text, None).context(NoTreeSnafu {
            language: Language::Java,
        })?;
        let chars = ByteToChar::new(text);
        let root = tree.root_node();
        trace!(children = root.child_count(), errors = root.has_error(), "parsed java");

        let mut builder = TreeBuilder::new(text);
        let root_id = builder.start_node(root.kind(), None, true, 0, 0);
        if root.is_error() {
            builder.mark_error(root_id);
        }
        let mut cursor = tree.walk();
        convert_children(&mut cursor, &mut builder, &chars, 0, text.len());
        Ok(builder.finish(chars.get(text.len())))
    }
}

fn convert_node(
    cursor: &mut TreeCursor<'_>,
    builder: &mut TreeBuilder,
    chars: &ByteToChar,
    field: Option<&'static str>,
) {
    let node = cursor.node();
    let (start, end) = (node.start_byte(), node.end_byte());

    if node.child_count() == 0 {
        let id = builder.leaf(
            node.kind(),
            field,
            node.is_named(),
            chars.get(start)..chars.get(end),
            start..end,
        );
        if node.is_error() || node.is_missing() {
            builder.mark_error(id);
        }
        return;
    }

    let id = builder.start_node(node.kind(), field, node.is_named(), chars.get(start), start);
    if node.is_error() || node.is_missing() {
        builder.mark_error(id);
    }
    convert_children(cursor, builder, chars, start, end);
    builder.finish_node(chars.get(end), end);
}

/// Convert the children of the cursor's node, keeping uncovered text between
/// `start` and `end` as gap leaves.
fn convert_children(
    cursor: &mut TreeCursor<'_>,
    builder: &mut TreeBuilder,
    chars: &ByteToChar,
    start: usize,
    end: usize,
) {
    let mut last_end = start;
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.start_byte() > last_end {
                builder.gap(
                    chars.get(last_end)..chars.get(child.start_byte()),
                    last_end..child.start_byte(),
                );
            }
            let field = cursor.field_name();
            convert_node(cursor, builder, chars, field);
            last_end = last_end.max(child.end_byte());
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
    if end > last_end {
        builder.gap(chars.get(last_end)..chars.get(end), last_end..end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxNode, WHITESPACE};

    fn parse(text: &str) -> SyntaxTree {
        JavaParser::new().unwrap().parse(text).unwrap()
    }

    fn find<'a>(tree: &'a SyntaxTree, kind: &str) -> SyntaxNode<'a> {
        tree.preorder().find(|n| n.kind() == kind).unwrap()
    }

    #[test]
    fn root_covers_leading_and_trailing_whitespace() {
        let text = "\n  class A {}\n\n";
        let tree = parse(text);
        assert_eq!(tree.root().kind(), "program");
        assert_eq!(tree.root().range(), 0..text.chars().count());
        assert_eq!(tree.root().first_child().unwrap().kind(), WHITESPACE);
    }

    #[test]
    fn leaves_tile_the_source() {
        let text = "class A {\n  // note\n  int x = 1; /* b */\n}\n";
        let tree = parse(text);
        let joined: String = tree.leaves().map(|n| n.text()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn keeps_field_names() {
        let tree = parse("class A { void run() { go(1); } }");
        let method = find(&tree, "method_declaration");
        assert_eq!(method.child_by_field("name").unwrap().text(), "run");
        let call = find(&tree, "method_invocation");
        assert_eq!(call.child_by_field("name").unwrap().text(), "go");
    }

    #[test]
    fn ranges_are_character_offsets() {
        let text = "class Ä { String s = \"ü\"; }";
        let tree = parse(text);
        let name = find(&tree, "class_declaration")
            .child_by_field("name")
            .unwrap();
        assert_eq!(name.text(), "Ä");
        assert_eq!(name.range(), 6..7);
        let literal = find(&tree, "string_literal");
        assert_eq!(literal.range(), 21..24);
    }

    #[test]
    fn broken_source_still_parses() {
        let tree = parse("class A { void f( { ");
        assert!(tree.has_errors());
        let joined: String = tree.leaves().map(|n| n.text()).collect();
        assert_eq!(joined, "class A { void f( { ");
    }

    #[test]
    fn empty_source() {
        let tree = parse("");
        assert_eq!(tree.root().range(), 0..0);
        assert_eq!(tree.node_count(), 1);
    }
}
