//! Language support for Wren
//!
//! Everything that differs between the supported languages lives here:
//! - [`lexer`] - Token streams used for lexical highlighting
//! - [`parser`] - Syntax trees for semantic highlighting
//! - [`annotate`] - Per-language semantic rules over those trees
//!
//! [`Language`] ties the three together and maps token kinds onto the
//! categories of a [`ColorScheme`].

pub mod annotate;
pub mod lexer;
pub mod parser;
pub mod syntax;
pub mod token;

pub use annotate::{annotate_tree, Annotator, HighlightSink};
pub use lexer::{Lexer, LexerRules};
pub use parser::{ParseError, SyntaxParser};
pub use syntax::{NodeId, SyntaxNode, SyntaxTree};
pub use token::{Token, TokenKind};

use wren_config::{ColorScheme, HighlightCategory, Style};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Kotlin,
}

impl Language {
    /// Every language, in detection order.
    pub const ALL: &'static [Language] = &[Language::Java, Language::Kotlin];

    /// First language in [`Language::ALL`] that accepts `file_name`.
    pub fn detect(file_name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|language| language.satisfies(file_name))
    }

    pub fn satisfies(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::Kotlin => &["kt", "kts"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
        }
    }

    pub fn rules(&self) -> &'static LexerRules {
        match self {
            Language::Java => &lexer::JAVA_RULES,
            Language::Kotlin => &lexer::KOTLIN_RULES,
        }
    }

    pub fn lexer<'a>(&self, text: &'a str) -> Lexer<'a> {
        Lexer::new(text, self.rules())
    }

    /// Prefix that starts a line comment.
    pub fn line_comment(&self) -> &'static str {
        "//"
    }

    /// Color scheme category for a token, or `None` for tokens that are not
    /// colored (whitespace and bad characters).
    pub fn category_of(&self, kind: TokenKind) -> Option<HighlightCategory> {
        use HighlightCategory as C;
        let category = match kind {
            TokenKind::Whitespace | TokenKind::BadCharacter => return None,
            TokenKind::Identifier => C::Identifier,
            TokenKind::Keyword => C::Keyword,
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral => C::Number,
            TokenKind::CharLiteral => C::CharLiteral,
            TokenKind::StringLiteral => C::String,
            TokenKind::TemplateEntry => C::StringTemplate,
            TokenKind::LineComment | TokenKind::Shebang => C::LineComment,
            TokenKind::BlockComment => C::BlockComment,
            TokenKind::DocComment => C::DocComment,
            TokenKind::LParen | TokenKind::RParen => C::Parentheses,
            TokenKind::LBrace | TokenKind::RBrace => C::Braces,
            TokenKind::LBracket | TokenKind::RBracket => C::Brackets,
            TokenKind::Semicolon => C::Semicolon,
            TokenKind::Colon => C::Colon,
            TokenKind::Comma => C::Comma,
            TokenKind::Dot | TokenKind::At | TokenKind::Operator => C::Operator,
        };
        Some(category)
    }

    pub fn attributes_of(&self, kind: TokenKind, scheme: &ColorScheme) -> Option<Style> {
        self.category_of(kind).map(|category| scheme.style(category))
    }

    pub fn parser(&self) -> Result<Box<dyn SyntaxParser>, ParseError> {
        parser::for_language(*self)
    }

    pub fn annotator(&self) -> &'static dyn Annotator {
        match self {
            Language::Java => &annotate::java::JavaAnnotator,
            Language::Kotlin => &annotate::kotlin::KotlinAnnotator,
        }
    }
}
