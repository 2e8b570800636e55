//! Parsing source text into a [`SyntaxTree`]
//!
//! Java goes through tree-sitter and is converted into the flat tree. Kotlin
//! is parsed by a delimiter-matching token tree built from the lexer, which is
//! enough structure for the annotator to recognise declarations and calls.

use crate::{syntax::SyntaxTree, Language};
use snafu::Snafu;

pub(crate) mod java;
pub(crate) mod kotlin;

/// Parser errors
#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display("Failed to load the {} grammar", language.name()))]
    Grammar { language: Language },

    #[snafu(display("Tree-sitter produced no tree for {}", language.name()))]
    NoTree { language: Language },
}

/// Builds a [`SyntaxTree`] for one language.
///
/// Parsers keep state between calls (tree-sitter's allocator, for example) so
/// a document handler holds one per document.
pub trait SyntaxParser: Send {
    fn language(&self) -> Language;

    /// Parse the whole text. The returned tree's root covers every character.
    fn parse(&mut self, text: &str) -> Result<SyntaxTree, ParseError>;
}

/// Create the parser for `language`.
pub fn for_language(language: Language) -> Result<Box<dyn SyntaxParser>, ParseError> {
    Ok(match language {
        Language::Java => Box::new(java::JavaParser::new()?),
        Language::Kotlin => Box::new(kotlin::KotlinParser),
    })
}
