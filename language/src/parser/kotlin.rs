//! Token-tree parser for Kotlin
//!
//! Tokens become leaves named after [`TokenKind::as_str`]. Matching
//! delimiters open groups: `(...)` is `parenthesized`, `{...}` is `block`,
//! `[...]` is `indexed` and `${...}` inside a string is
//! `template_expression`. Unbalanced closers become error leaves and groups
//! still open at the end of the text are closed there and marked as errors.

use crate::{
    lexer::{Lexer, KOTLIN_RULES},
    parser::{ParseError, SyntaxParser},
    syntax::{NodeId, SyntaxTree, TreeBuilder},
    token::{Token, TokenKind},
    Language,
};
use tracing::trace;

pub(crate) struct KotlinParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Paren,
    Brace,
    Bracket,
    Template,
}

impl Group {
    fn opened_by(token: &Token<'_>) -> Option<Self> {
        match token.kind {
            TokenKind::LParen => Some(Group::Paren),
            TokenKind::LBrace => Some(Group::Brace),
            TokenKind::LBracket => Some(Group::Bracket),
            TokenKind::TemplateEntry if token.text == "${" => Some(Group::Template),
            _ => None,
        }
    }

    fn is_closer(token: &Token<'_>) -> bool {
        matches!(
            token.kind,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket
        ) || (token.kind == TokenKind::TemplateEntry && token.text == "}")
    }

    fn closed_by(self, token: &Token<'_>) -> bool {
        match self {
            Group::Paren => token.kind == TokenKind::RParen,
            Group::Brace => token.kind == TokenKind::RBrace,
            Group::Bracket => token.kind == TokenKind::RBracket,
            Group::Template => token.kind == TokenKind::TemplateEntry && token.text == "}",
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Group::Paren => "parenthesized",
            Group::Brace => "block",
            Group::Bracket => "indexed",
            Group::Template => "template_expression",
        }
    }
}

fn is_named(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::IntegerLiteral
            | TokenKind::FloatLiteral
            | TokenKind::CharLiteral
            | TokenKind::StringLiteral
            | TokenKind::LineComment
            | TokenKind::BlockComment
            | TokenKind::DocComment
            | TokenKind::Shebang
    )
}

impl SyntaxParser for KotlinParser {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn parse(&mut self, text: &str) -> Result<SyntaxTree, ParseError> {
        let mut builder = TreeBuilder::new(text);
        builder.start_node("source_file", None, true, 0, 0);

        let mut open: Vec<(NodeId, Group)> = Vec::new();
        let mut byte = 0;
        let mut end = 0;
        for token in Lexer::new(text, &KOTLIN_RULES) {
            let bytes = byte..byte + token.text.len();
            byte = bytes.end;
            end = token.end;
            let range = token.start..token.end;
            let kind = token.kind.as_str();

            if let Some(group) = Group::opened_by(&token) {
                let id = builder.start_node(group.kind(), None, true, token.start, bytes.start);
                builder.leaf(kind, None, false, range, bytes);
                open.push((id, group));
                continue;
            }

            if Group::is_closer(&token) {
                if open.iter().any(|(_, group)| group.closed_by(&token)) {
                    // Groups opened after the matching one never saw their closer.
                    while let Some((id, group)) = open.pop() {
                        if group.closed_by(&token) {
                            builder.leaf(kind, None, false, range.clone(), bytes.clone());
                            builder.finish_node(token.end, bytes.end);
                            break;
                        }
                        builder.mark_error(id);
                        builder.finish_node(token.start, bytes.start);
                    }
                } else {
                    let id = builder.leaf(kind, None, false, range, bytes);
                    builder.mark_error(id);
                }
                continue;
            }

            let id = builder.leaf(kind, None, is_named(token.kind), range, bytes);
            if token.kind == TokenKind::BadCharacter {
                builder.mark_error(id);
            }
        }

        trace!(unclosed = open.len(), "parsed kotlin");
        for (id, _) in open {
            builder.mark_error(id);
        }
        Ok(builder.finish(end))
    }
}
