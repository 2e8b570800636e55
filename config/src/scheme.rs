//! Named styles per highlight category.

use crate::style::Style;
use serde::{Deserialize, Serialize};

/// Lexical and semantic categories a color scheme assigns styles to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    Keyword,
    String,
    StringTemplate,
    CharLiteral,
    Number,
    LineComment,
    BlockComment,
    DocComment,
    Operator,
    Parentheses,
    Braces,
    Brackets,
    Semicolon,
    Colon,
    Comma,
    Identifier,
    Annotation,
    TypeName,
    FunctionDeclaration,
    FunctionCall,
    Property,
    Variable,
    Parameter,
    Namespace,
}

/// One [`Style`] per [`HighlightCategory`].
///
/// Missing entries in a settings file fall back to the Darcula-like defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub keywords: Style,
    pub strings: Style,
    pub template_entries: Style,
    pub char_literals: Style,
    pub numbers: Style,
    pub line_comments: Style,
    pub block_comments: Style,
    pub doc_comments: Style,
    pub operators: Style,
    pub parentheses: Style,
    pub braces: Style,
    pub brackets: Style,
    pub semicolons: Style,
    pub colons: Style,
    pub commas: Style,
    pub identifiers: Style,
    pub annotations: Style,
    pub type_names: Style,
    pub function_declarations: Style,
    pub function_calls: Style,
    pub properties: Style,
    pub variables: Style,
    pub parameters: Style,
    pub namespaces: Style,
}

impl Default for ColorScheme {
    fn default() -> Self {
        let punctuation = Style::fg(0xcc7832);
        Self {
            keywords: Style::fg(0xcc7832).bold(),
            strings: Style::fg(0x6a8759),
            template_entries: Style::fg(0xcc7832),
            char_literals: Style::fg(0x6a8759),
            numbers: Style::fg(0x6897bb),
            line_comments: Style::fg(0x808080).italic(),
            block_comments: Style::fg(0x808080).italic(),
            doc_comments: Style::fg(0x629755).italic(),
            operators: Style::fg(0xa9b7c6),
            parentheses: Style::fg(0xa9b7c6),
            braces: Style::fg(0xa9b7c6),
            brackets: Style::fg(0xa9b7c6),
            semicolons: punctuation,
            colons: Style::fg(0xa9b7c6),
            commas: punctuation,
            identifiers: Style::fg(0xa9b7c6),
            annotations: Style::fg(0xbbb529),
            type_names: Style::fg(0x769aa5),
            function_declarations: Style::fg(0xffc66d),
            function_calls: Style::fg(0xa9b7c6).italic(),
            properties: Style::fg(0x9876aa),
            variables: Style::fg(0xa9b7c6),
            parameters: Style::fg(0xa9b7c6).underline(),
            namespaces: Style::fg(0xafbf7e),
        }
    }
}

impl ColorScheme {
    pub fn style(&self, category: HighlightCategory) -> Style {
        use HighlightCategory::*;
        match category {
            Keyword => self.keywords,
            String => self.strings,
            StringTemplate => self.template_entries,
            CharLiteral => self.char_literals,
            Number => self.numbers,
            LineComment => self.line_comments,
            BlockComment => self.block_comments,
            DocComment => self.doc_comments,
            Operator => self.operators,
            Parentheses => self.parentheses,
            Braces => self.braces,
            Brackets => self.brackets,
            Semicolon => self.semicolons,
            Colon => self.colons,
            Comma => self.commas,
            Identifier => self.identifiers,
            Annotation => self.annotations,
            TypeName => self.type_names,
            FunctionDeclaration => self.function_declarations,
            FunctionCall => self.function_calls,
            Property => self.properties,
            Variable => self.variables,
            Parameter => self.parameters,
            Namespace => self.namespaces,
        }
    }
}
