use crate::{
    annotate::{paint, Annotator, HighlightSink},
    syntax::SyntaxNode,
};
use wren_config::{ColorScheme, HighlightCategory};

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

const PARAMETERS: &[&str] = &[
    "formal_parameter",
    "spread_parameter",
    "catch_formal_parameter",
];

/// Annotates tree-sitter-java trees by node kind and field name.
pub(crate) struct JavaAnnotator;

impl Annotator for JavaAnnotator {
    fn annotate(&self, node: SyntaxNode<'_>, sink: &mut dyn HighlightSink, scheme: &ColorScheme) {
        match node.kind() {
            "identifier" => {
                if let Some(category) = identifier_category(node) {
                    paint(sink, scheme, node.range(), category);
                }
            },
            "type_identifier" => paint(sink, scheme, node.range(), HighlightCategory::TypeName),
            "marker_annotation" | "annotation" => {
                // `@` through the end of the name, not the arguments.
                let end = node
                    .child_by_field("name")
                    .map_or(node.end(), |name| name.end());
                paint(sink, scheme, node.start()..end, HighlightCategory::Annotation);
            },
            "package_declaration" | "import_declaration" => {
                let path = node
                    .children()
                    .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"));
                if let Some(path) = path {
                    paint(sink, scheme, path.range(), HighlightCategory::Namespace);
                }
            },
            _ => {},
        }
    }
}

fn identifier_category(node: SyntaxNode<'_>) -> Option<HighlightCategory> {
    let parent = node.parent()?;
    let field = node.field();
    let category = match (parent.kind(), field) {
        ("method_declaration" | "constructor_declaration", Some("name")) => {
            HighlightCategory::FunctionDeclaration
        },
        ("method_invocation", Some("name")) => HighlightCategory::FunctionCall,
        (kind, Some("name")) if TYPE_DECLARATIONS.contains(&kind) => HighlightCategory::TypeName,
        ("variable_declarator", Some("name")) => {
            match parent.parent().map(|declaration| declaration.kind()) {
                Some("field_declaration" | "constant_declaration") => HighlightCategory::Property,
                _ => HighlightCategory::Variable,
            }
        },
        ("field_access", Some("field")) => HighlightCategory::Property,
        (kind, Some("name")) if PARAMETERS.contains(&kind) => HighlightCategory::Parameter,
        // Single-segment paths; qualified ones are painted by the declaration.
        ("package_declaration" | "import_declaration", _) => HighlightCategory::Namespace,
        _ => return None,
    };
    Some(category)
}

#[cfg(test)]
mod tests {
    use crate::{
        annotate::test_support::{annotate, expected, style_of},
        Language,
    };
    use wren_config::HighlightCategory::*;

    const SOURCE: &str = r#"package com.example.app;

import java.util.List;

@Deprecated
public class Greeter extends Base {
    private final int countField = 0;

    public Greeter(String greeting) {
        int localVar = greeting.length();
        this.countField2 = localVar;
    }

    @Override
    public void sayHello(List<String> names) {
        names.forEach(n -> System.out.println(n));
    }
}
"#;

    fn style(needle: &str) -> Option<wren_config::Style> {
        style_of(Language::Java, SOURCE, needle)
    }

    #[test]
    fn declarations() {
        assert_eq!(style("Greeter"), expected(TypeName));
        assert_eq!(style("sayHello"), expected(FunctionDeclaration));
        assert_eq!(style("Base"), expected(TypeName));
    }

    #[test]
    fn constructor_name_is_a_declaration() {
        let calls = annotate(Language::Java, SOURCE);
        let start = SOURCE.find("Greeter(").unwrap();
        assert!(calls
            .iter()
            .any(|(range, style)| range.start == start && Some(*style) == expected(FunctionDeclaration)));
    }

    #[test]
    fn calls_and_members() {
        assert_eq!(style("length"), expected(FunctionCall));
        assert_eq!(style("forEach"), expected(FunctionCall));
        assert_eq!(style("countField"), expected(Property));
        assert_eq!(style("countField2"), expected(Property));
        assert_eq!(style("localVar"), expected(Variable));
    }

    #[test]
    fn parameters() {
        assert_eq!(style("greeting"), expected(Parameter));
        assert_eq!(style("names"), expected(Parameter));
    }

    #[test]
    fn annotations_and_paths() {
        assert_eq!(style("@Deprecated"), expected(Annotation));
        assert_eq!(style("@Override"), expected(Annotation));
        assert_eq!(style("com.example.app"), expected(Namespace));
        assert_eq!(style("java.util.List"), expected(Namespace));
    }

    #[test]
    fn whitespace_is_never_annotated() {
        for (range, _) in annotate(Language::Java, SOURCE) {
            let text: std::string::String = SOURCE
                .chars()
                .skip(range.start)
                .take(range.len())
                .collect();
            assert!(!text.trim().is_empty(), "annotated whitespace at {range:?}");
        }
    }
}
