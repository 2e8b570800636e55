use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Identifier,
    Keyword,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    /// A run of string literal text, including its quotes when present.
    StringLiteral,
    /// `$name`, `${` or the `}` closing a template expression.
    TemplateEntry,
    LineComment,
    BlockComment,
    DocComment,
    Shebang,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,
    At,
    Operator,
    BadCharacter,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::IntegerLiteral => "integer_literal",
            TokenKind::FloatLiteral => "float_literal",
            TokenKind::CharLiteral => "char_literal",
            TokenKind::StringLiteral => "string_literal",
            TokenKind::TemplateEntry => "template_entry",
            TokenKind::LineComment => "line_comment",
            TokenKind::BlockComment => "block_comment",
            TokenKind::DocComment => "doc_comment",
            TokenKind::Shebang => "shebang",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::At => "@",
            TokenKind::Operator => "operator",
            TokenKind::BadCharacter => "bad_character",
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::DocComment
                | TokenKind::Shebang
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexed slice of the source.
///
/// `start..end` is a character range; `text` is the matching slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub kind: TokenKind,
}
