use crate::{
    annotate::{paint, Annotator, HighlightSink},
    syntax::SyntaxNode,
};
use wren_config::{ColorScheme, HighlightCategory};

/// Annotates Kotlin token trees from the tokens around each identifier.
pub(crate) struct KotlinAnnotator;

impl Annotator for KotlinAnnotator {
    fn annotate(&self, node: SyntaxNode<'_>, sink: &mut dyn HighlightSink, scheme: &ColorScheme) {
        match node.kind() {
            "identifier" => {
                if let Some(category) = identifier_category(node) {
                    paint(sink, scheme, node.range(), category);
                }
            },
            "@" => {
                // Only when the name follows directly: `@Inject`, `@file:JvmName`.
                if let Some(name) = node.next_sibling().filter(|n| n.kind() == "identifier") {
                    paint(sink, scheme, node.start()..name.end(), HighlightCategory::Annotation);
                }
            },
            "keyword" if matches!(node.text(), "package" | "import") => {
                if let Some(path) = qualified_path(node) {
                    paint(sink, scheme, path, HighlightCategory::Namespace);
                }
            },
            _ => {},
        }
    }
}

fn is_keyword(node: Option<SyntaxNode<'_>>, words: &[&str]) -> bool {
    node.is_some_and(|node| node.kind() == "keyword" && words.contains(&node.text()))
}

fn identifier_category(node: SyntaxNode<'_>) -> Option<HighlightCategory> {
    let prev = node.prev_significant();
    let next = node.next_significant();

    if prev.is_some_and(|prev| prev.kind() == "@") && node.prev_sibling() == prev {
        return Some(HighlightCategory::Annotation);
    }
    if is_keyword(prev, &["fun"]) {
        // `fun String.trimmed()` names a receiver type before the dot.
        if next.is_some_and(|next| next.kind() == ".") {
            return Some(HighlightCategory::TypeName);
        }
        return Some(HighlightCategory::FunctionDeclaration);
    }
    if is_keyword(prev, &["class", "interface", "object", "typealias"]) {
        return Some(HighlightCategory::TypeName);
    }
    if is_keyword(prev, &["val", "var"]) {
        return Some(HighlightCategory::Property);
    }
    if is_parameter(node, next) {
        return Some(HighlightCategory::Parameter);
    }

    let called = node
        .next_sibling()
        .is_some_and(|next| next.kind() == "parenthesized")
        || (prev.is_some_and(|prev| prev.kind() == ".")
            && next.is_some_and(|next| next.kind() == "block"));
    if called {
        if is_extension_name(prev) {
            return Some(HighlightCategory::FunctionDeclaration);
        }
        if !starts_uppercase(node.text()) {
            return Some(HighlightCategory::FunctionCall);
        }
    }
    if starts_uppercase(node.text()) {
        return Some(HighlightCategory::TypeName);
    }
    None
}

/// `name: Type` directly inside the parameter list of a `fun`.
fn is_parameter(node: SyntaxNode<'_>, next: Option<SyntaxNode<'_>>) -> bool {
    if !next.is_some_and(|next| next.kind() == ":") {
        return false;
    }
    let Some(group) = node.parent().filter(|p| p.kind() == "parenthesized") else {
        return false;
    };
    let mut owner = group.prev_significant();
    // Skip generic parameters and receivers: `fun <T> Foo<T>.bar(`.
    while let Some(candidate) = owner {
        if is_keyword(Some(candidate), &["fun", "constructor"]) {
            return true;
        }
        if candidate.kind() == "identifier" && is_keyword(candidate.prev_significant(), &["class"]) {
            return false;
        }
        if !matches!(candidate.kind(), "identifier" | "." | "operator") {
            return false;
        }
        owner = candidate.prev_significant();
    }
    false
}

/// The name after `fun Receiver.`.
fn is_extension_name(dot: Option<SyntaxNode<'_>>) -> bool {
    let Some(dot) = dot.filter(|dot| dot.kind() == ".") else {
        return false;
    };
    let receiver = dot.prev_significant();
    receiver.is_some_and(|receiver| {
        receiver.kind() == "identifier" && is_keyword(receiver.prev_significant(), &["fun"])
    })
}

/// Range of the dotted name following `package` or `import`.
fn qualified_path(keyword: SyntaxNode<'_>) -> Option<std::ops::Range<usize>> {
    let first = keyword.next_significant()?;
    if first.kind() != "identifier" {
        return None;
    }
    let mut end = first.end();
    let mut cursor = first.next_sibling();
    while let Some(node) = cursor {
        match node.kind() {
            "." | "identifier" => end = node.end(),
            "operator" if node.text() == "*" => end = node.end(),
            _ => break,
        }
        cursor = node.next_sibling();
    }
    Some(first.start()..end)
}

fn starts_uppercase(text: &str) -> bool {
    text.chars()
        .find(|&c| c != '`')
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use crate::{
        annotate::test_support::{annotate, expected, style_of},
        Language,
    };
    use wren_config::HighlightCategory::*;

    const SOURCE: &str = r#"package com.example.app

import kotlin.math.*

@Suppress("unused")
class Greeter(private val greeting: String) {
    val countProp = 0

    fun sayHello(names: List<String>) {
        names.forEach { println(greeting + it) }
        val total = compute(names.size)
    }

    fun Int.doubled(): Int = this * 2
}

object Registry
"#;

    fn style(needle: &str) -> Option<wren_config::Style> {
        style_of(Language::Kotlin, SOURCE, needle)
    }

    #[test]
    fn declarations() {
        assert_eq!(style("Greeter"), expected(TypeName));
        assert_eq!(style("Registry"), expected(TypeName));
        assert_eq!(style("sayHello"), expected(FunctionDeclaration));
        assert_eq!(style("doubled"), expected(FunctionDeclaration));
        assert_eq!(style("countProp"), expected(Property));
        assert_eq!(style("total"), expected(Property));
    }

    #[test]
    fn extension_receiver_is_a_type() {
        assert_eq!(style("Int."), None);
        let calls = annotate(Language::Kotlin, SOURCE);
        let start = SOURCE.find("Int.doubled").unwrap();
        assert!(calls
            .iter()
            .any(|(range, style)| *range == (start..start + 3) && Some(*style) == expected(TypeName)));
    }

    #[test]
    fn calls() {
        assert_eq!(style("println"), expected(FunctionCall));
        assert_eq!(style("compute"), expected(FunctionCall));
        assert_eq!(style("forEach"), expected(FunctionCall));
    }

    #[test]
    fn parameters() {
        assert_eq!(style("names"), expected(Parameter));
        // Constructor properties are properties, not parameters.
        assert_eq!(style("greeting"), expected(Property));
    }

    #[test]
    fn capitalised_names_are_types() {
        assert_eq!(style("String"), expected(TypeName));
        assert_eq!(style("List"), expected(TypeName));
    }

    #[test]
    fn annotations_and_paths() {
        assert_eq!(style("@Suppress"), expected(Annotation));
        assert_eq!(style("com.example.app"), expected(Namespace));
        assert_eq!(style("kotlin.math.*"), expected(Namespace));
    }

    #[test]
    fn plain_identifiers_are_left_alone() {
        assert_eq!(style("it"), None);
    }
}
