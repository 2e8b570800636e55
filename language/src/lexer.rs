//! Hand-written lexer shared by the supported languages
//!
//! [`Lexer`] is a restartable iterator over [`Token`]s. Tokens cover the
//! input exactly: no gaps, no overlaps, every token non-empty. Malformed input
//! never stops the lexer; it produces [`TokenKind::BadCharacter`] tokens or
//! unterminated literals instead.
//!
//! Language differences live in [`LexerRules`]: keyword and operator tables,
//! Kotlin string templates, raw strings, nested comments, and identifier
//! details.

use crate::token::{Token, TokenKind};

/// Per-language lexing rules.
#[derive(Debug)]
pub struct LexerRules {
    pub keywords: &'static [&'static str],
    /// Multi- and single-character operators; the longest match wins.
    pub operators: &'static [&'static str],
    /// `$name` and `${ ... }` inside string literals.
    pub string_templates: bool,
    /// `"""` delimited strings.
    pub raw_strings: bool,
    pub nested_comments: bool,
    /// `$` is an identifier character.
    pub dollar_identifiers: bool,
    /// `` `any text` `` is an identifier.
    pub backtick_identifiers: bool,
    /// `#!` on the first line is a comment.
    pub shebang: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    String { raw: bool },
    /// Code inside `${ ... }`, tracking nested braces.
    Template { depth: usize },
}

/// Lazily tokenizes a whole text.
pub struct Lexer<'a> {
    text: &'a str,
    rules: &'static LexerRules,
    byte: usize,
    offset: usize,
    modes: Vec<Mode>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, rules: &'static LexerRules) -> Self {
        Self {
            text,
            rules,
            byte: 0,
            offset: 0,
            modes: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.byte..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.byte += ch.len_utf8();
        self.offset += 1;
        Some(ch)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut pred) {
            self.bump();
        }
    }

    fn is_ident_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || (self.rules.dollar_identifiers && ch == '$')
    }

    fn code_token(&mut self, start_byte: usize) -> TokenKind {
        let Some(ch) = self.bump() else {
            return TokenKind::BadCharacter;
        };

        match ch {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            },
            '#' if self.rules.shebang && start_byte == 0 && self.peek() == Some('!') => {
                self.eat_while(|c| c != '\n');
                TokenKind::Shebang
            },
            '/' if self.peek() == Some('/') => {
                self.eat_while(|c| c != '\n');
                TokenKind::LineComment
            },
            '/' if self.peek() == Some('*') => self.block_comment(),
            '"' => {
                let raw = self.rules.raw_strings && self.rest().starts_with("\"\"");
                if raw {
                    self.bump_n(2);
                }
                self.modes.push(Mode::String { raw });
                self.string_part(raw, start_byte)
                    .unwrap_or(TokenKind::StringLiteral)
            },
            '\'' => self.char_literal(),
            '`' if self.rules.backtick_identifiers => {
                self.eat_while(|c| c != '`' && c != '\n');
                if self.peek() == Some('`') {
                    self.bump();
                }
                TokenKind::Identifier
            },
            c if c.is_ascii_digit() => self.number(c),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.number('.'),
            c if self.is_ident_start(c) => {
                let dollar = self.rules.dollar_identifiers;
                self.eat_while(|c| c.is_alphanumeric() || c == '_' || (dollar && c == '$'));
                let word = &self.text[start_byte..self.byte];
                if self.rules.keywords.contains(&word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            },
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '@' => TokenKind::At,
            '{' => {
                if let Some(Mode::Template { depth }) = self.modes.last_mut() {
                    *depth += 1;
                }
                TokenKind::LBrace
            },
            '}' => match self.modes.last_mut() {
                Some(Mode::Template { depth: 0 }) => {
                    self.modes.pop();
                    TokenKind::TemplateEntry
                },
                Some(Mode::Template { depth }) => {
                    *depth -= 1;
                    TokenKind::RBrace
                },
                _ => TokenKind::RBrace,
            },
            c => self.operator(c, start_byte),
        }
    }

    fn operator(&mut self, first: char, start_byte: usize) -> TokenKind {
        let source = &self.text[start_byte..];
        let longest = self
            .rules
            .operators
            .iter()
            .filter(|op| source.starts_with(**op))
            .max_by_key(|op| op.len());

        match (longest, first) {
            (Some(op), _) => {
                self.bump_n(op.chars().count() - 1);
                TokenKind::Operator
            },
            (None, ':') => TokenKind::Colon,
            (None, '.') => TokenKind::Dot,
            (None, _) => TokenKind::BadCharacter,
        }
    }

    fn block_comment(&mut self) -> TokenKind {
        // Opening `/` is consumed, `*` is next
        self.bump();
        let doc = self.peek() == Some('*') && self.peek_nth(1) != Some('/');
        let mut depth = 1;
        while depth > 0 {
            if self.rest().starts_with("*/") {
                self.bump_n(2);
                depth -= 1;
            } else if self.rules.nested_comments && self.rest().starts_with("/*") {
                self.bump_n(2);
                depth += 1;
            } else if self.bump().is_none() {
                break;
            }
        }
        if doc {
            TokenKind::DocComment
        } else {
            TokenKind::BlockComment
        }
    }

    fn char_literal(&mut self) -> TokenKind {
        while let Some(ch) = self.peek() {
            match ch {
                '\n' => break,
                '\\' => {
                    self.bump();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                },
                '\'' => {
                    self.bump();
                    break;
                },
                _ => {
                    self.bump();
                },
            }
        }
        TokenKind::CharLiteral
    }

    fn number(&mut self, first: char) -> TokenKind {
        let digits = |c: char| c.is_ascii_digit() || c == '_';
        let mut float = first == '.';

        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.bump();
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
        } else if first == '0' && matches!(self.peek(), Some('b' | 'B')) {
            self.bump();
            self.eat_while(|c| matches!(c, '0' | '1' | '_'));
        } else {
            self.eat_while(digits);
            if !float
                && self.peek() == Some('.')
                && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
            {
                self.bump();
                float = true;
                self.eat_while(digits);
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let exponent = match self.peek_nth(1) {
                    Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                    Some(c) => c.is_ascii_digit(),
                    None => false,
                };
                if exponent {
                    self.bump_n(2);
                    self.eat_while(digits);
                    float = true;
                }
            }
            if matches!(self.peek(), Some('f' | 'F' | 'd' | 'D')) {
                self.bump();
                float = true;
            }
        }

        if matches!(self.peek(), Some('u' | 'U')) {
            self.bump();
        }
        if matches!(self.peek(), Some('l' | 'L')) {
            self.bump();
        }

        if float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        }
    }

    /// Scan string contents up to the closing quote or the next template
    /// entry. Returns `None` when the string ends before anything was
    /// consumed; the string mode is popped either way.
    fn string_part(&mut self, raw: bool, start_byte: usize) -> Option<TokenKind> {
        loop {
            let progressed = self.byte > start_byte;
            match self.peek() {
                None => {
                    self.modes.pop();
                    return progressed.then_some(TokenKind::StringLiteral);
                },
                Some('"') if raw => {
                    if self.rest().starts_with("\"\"\"") {
                        while self.rest().starts_with("\"\"\"\"") {
                            self.bump();
                        }
                        self.bump_n(3);
                        self.modes.pop();
                        return Some(TokenKind::StringLiteral);
                    }
                    self.bump();
                },
                Some('"') => {
                    self.bump();
                    self.modes.pop();
                    return Some(TokenKind::StringLiteral);
                },
                Some('\n') if !raw => {
                    self.modes.pop();
                    return progressed.then_some(TokenKind::StringLiteral);
                },
                Some('\\') if !raw => {
                    self.bump();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                },
                Some('$') if self.rules.string_templates => {
                    let next = self.peek_nth(1);
                    let entry = next == Some('{') || next.is_some_and(|c| c.is_alphabetic() || c == '_');
                    if !entry {
                        self.bump();
                        continue;
                    }
                    if progressed {
                        return Some(TokenKind::StringLiteral);
                    }
                    self.bump();
                    if next == Some('{') {
                        self.bump();
                        self.modes.push(Mode::Template { depth: 0 });
                    } else {
                        self.eat_while(|c| c.is_alphanumeric() || c == '_');
                    }
                    return Some(TokenKind::TemplateEntry);
                },
                Some(_) => {
                    self.bump();
                },
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.byte >= self.text.len() {
            return None;
        }

        let start_byte = self.byte;
        let start = self.offset;
        let kind = match self.modes.last() {
            Some(&Mode::String { raw }) => self.string_part(raw, start_byte),
            _ => None,
        }
        .unwrap_or_else(|| self.code_token(start_byte));

        Some(Token {
            start,
            end: self.offset,
            text: &self.text[start_byte..self.byte],
            kind,
        })
    }
}

pub static JAVA_RULES: LexerRules = LexerRules {
    keywords: &[
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
        "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
        "int", "interface", "long", "native", "new", "null", "package", "permits", "private",
        "protected", "public", "record", "return", "sealed", "short", "static", "strictfp",
        "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
        "var", "void", "volatile", "while", "yield",
    ],
    operators: &[
        ">>>=", "<<=", ">>=", ">>>", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
        ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "+", "-", "*", "/",
        "%", "=", "<", ">", "!", "~", "?", "&", "|", "^",
    ],
    string_templates: false,
    raw_strings: true,
    nested_comments: false,
    dollar_identifiers: true,
    backtick_identifiers: false,
    shebang: false,
};

pub static KOTLIN_RULES: LexerRules = LexerRules {
    keywords: &[
        // Hard keywords
        "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
        "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
        "true", "try", "typealias", "typeof", "val", "var", "when", "while",
        // Soft keywords
        "by", "catch", "constructor", "delegate", "dynamic", "field", "file", "finally", "get",
        "import", "init", "param", "property", "receiver", "set", "setparam", "where",
        // Modifiers
        "abstract", "actual", "annotation", "companion", "const", "crossinline", "data", "enum",
        "expect", "external", "final", "infix", "inline", "inner", "internal", "lateinit",
        "noinline", "open", "operator", "out", "override", "private", "protected", "public",
        "reified", "sealed", "suspend", "tailrec", "vararg", "value",
    ],
    operators: &[
        "===", "!==", "..<", "!!", "?:", "?.", "::", "..", "->", "++", "--", "&&", "||", "==",
        "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "+", "-", "*", "/", "%", "=", "<", ">",
        "!", "?", "&", "|",
    ],
    string_templates: true,
    raw_strings: true,
    nested_comments: true,
    dollar_identifiers: false,
    backtick_identifiers: true,
    shebang: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(text: &'a str, rules: &'static LexerRules) -> Vec<(TokenKind, &'a str)> {
        Lexer::new(text, rules)
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn assert_covers(text: &str, rules: &'static LexerRules) {
        let mut expected_start = 0;
        let mut rebuilt = String::new();
        for token in Lexer::new(text, rules) {
            assert_eq!(token.start, expected_start, "gap or overlap at {token:?}");
            assert!(token.end > token.start, "empty token {token:?}");
            assert_eq!(token.end - token.start, token.text.chars().count());
            expected_start = token.end;
            rebuilt.push_str(token.text);
        }
        assert_eq!(expected_start, text.chars().count());
        assert_eq!(rebuilt, text);
    }

    const KOTLIN_SAMPLE: &str = r#"#!/usr/bin/env kotlin
package demo.app

/** Entry point */
fun main(args: Array<String>) {
    val name = "wörld"
    println("Hello, $name! ${args.size + 1} args, ${ mapOf(1 to "x") }")
    val raw = """a "quoted" $name"""
    /* outer /* inner */ still comment */
    val `odd name` = 0x1F_FFL + 1.5e-3f + 1..2
    if (name?.length ?: 0 > 0) println('\n')
}
"#;

    const JAVA_SAMPLE: &str = r#"package demo;

import java.util.List;

/** Docs */
@Deprecated
public class Main {
    private int $count = 0b1010;
    public static void main(String[] args) {
        String s = "escaped \" quote";
        char c = '\'';
        double d = .5e10d >>> 2;
        List<String> xs = List.of("「全角」");
        xs.forEach(System.out::println);
        String block = """
            text "block"
            """;
    }
}
"#;

    #[test]
    fn covers_kotlin_sample() {
        assert_covers(KOTLIN_SAMPLE, &KOTLIN_RULES);
    }

    #[test]
    fn covers_java_sample() {
        assert_covers(JAVA_SAMPLE, &JAVA_RULES);
    }

    #[test]
    fn covers_malformed_input() {
        assert_covers("\"unterminated\nval x = '\\", &KOTLIN_RULES);
        assert_covers("/* never closed", &JAVA_RULES);
        assert_covers("\"${\n", &KOTLIN_RULES);
        assert_covers("\"abc $x\nfoo", &KOTLIN_RULES);
        assert_covers("# § ¶", &JAVA_RULES);
        assert_covers("", &KOTLIN_RULES);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("fun main() {}", &KOTLIN_RULES),
            vec![
                (TokenKind::Keyword, "fun"),
                (TokenKind::Identifier, "main"),
                (TokenKind::LParen, "("),
                (TokenKind::RParen, ")"),
                (TokenKind::LBrace, "{"),
                (TokenKind::RBrace, "}"),
            ]
        );
        // `fun` is not a Java keyword
        assert_eq!(kinds("fun", &JAVA_RULES), vec![(TokenKind::Identifier, "fun")]);
    }

    #[test]
    fn kotlin_string_templates() {
        assert_eq!(
            kinds(r#""a $b ${c + 1} d""#, &KOTLIN_RULES),
            vec![
                (TokenKind::StringLiteral, "\"a "),
                (TokenKind::TemplateEntry, "$b"),
                (TokenKind::StringLiteral, " "),
                (TokenKind::TemplateEntry, "${"),
                (TokenKind::Identifier, "c"),
                (TokenKind::Operator, "+"),
                (TokenKind::IntegerLiteral, "1"),
                (TokenKind::TemplateEntry, "}"),
                (TokenKind::StringLiteral, " d\""),
            ]
        );
    }

    #[test]
    fn braces_inside_templates_nest() {
        let tokens = kinds(r#""${ f { x } }""#, &KOTLIN_RULES);
        assert_eq!(tokens.first(), Some(&(TokenKind::StringLiteral, "\"")));
        assert_eq!(tokens[1], (TokenKind::TemplateEntry, "${"));
        assert!(tokens.contains(&(TokenKind::LBrace, "{")));
        assert!(tokens.contains(&(TokenKind::RBrace, "}")));
        assert_eq!(tokens[tokens.len() - 2], (TokenKind::TemplateEntry, "}"));
        assert_eq!(tokens.last(), Some(&(TokenKind::StringLiteral, "\"")));
    }

    #[test]
    fn java_has_no_templates() {
        assert_eq!(
            kinds(r#""$x ${y}""#, &JAVA_RULES),
            vec![(TokenKind::StringLiteral, r#""$x ${y}""#)]
        );
    }

    #[test]
    fn numbers() {
        let tokens = kinds("42 0xFFL 1_000 3.14 1e5 2f .5 1..2", &KOTLIN_RULES);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::IntegerLiteral, "42"),
                (TokenKind::IntegerLiteral, "0xFFL"),
                (TokenKind::IntegerLiteral, "1_000"),
                (TokenKind::FloatLiteral, "3.14"),
                (TokenKind::FloatLiteral, "1e5"),
                (TokenKind::FloatLiteral, "2f"),
                (TokenKind::FloatLiteral, ".5"),
                (TokenKind::IntegerLiteral, "1"),
                (TokenKind::Operator, ".."),
                (TokenKind::IntegerLiteral, "2"),
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("/** doc */ /**/ /* a /* b */ c */ // end", &KOTLIN_RULES),
            vec![
                (TokenKind::DocComment, "/** doc */"),
                (TokenKind::BlockComment, "/**/"),
                (TokenKind::BlockComment, "/* a /* b */ c */"),
                (TokenKind::LineComment, "// end"),
            ]
        );
        // Java block comments do not nest
        assert_eq!(
            kinds("/* a /* b */ c", &JAVA_RULES)[0],
            (TokenKind::BlockComment, "/* a /* b */")
        );
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(
            kinds("a ?: b?.c!!", &KOTLIN_RULES),
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Operator, "?:"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Operator, "?."),
                (TokenKind::Identifier, "c"),
                (TokenKind::Operator, "!!"),
            ]
        );
        assert_eq!(kinds("x >>>= 1", &JAVA_RULES)[1], (TokenKind::Operator, ">>>="));
        assert_eq!(kinds("a:b", &JAVA_RULES)[1], (TokenKind::Colon, ":"));
        assert_eq!(kinds("a.b", &JAVA_RULES)[1], (TokenKind::Dot, "."));
    }

    #[test]
    fn char_offsets_count_characters() {
        let tokens: Vec<_> = Lexer::new("「x」 y", &KOTLIN_RULES).collect();
        let y = tokens.iter().find(|t| t.text == "y").unwrap();
        assert_eq!((y.start, y.end), (4, 5));
    }

    #[test]
    fn restartable() {
        let first: Vec<_> = Lexer::new(KOTLIN_SAMPLE, &KOTLIN_RULES).collect();
        let second: Vec<_> = Lexer::new(KOTLIN_SAMPLE, &KOTLIN_RULES).collect();
        assert_eq!(first, second);
    }
}
