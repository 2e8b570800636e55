//! Highlight cache reconciliation through the full pipeline.

mod common;

use common::Session;
use wren::{EditorOptions, HighlightRun};
use wren_config::HighlightCategory;

const KOTLIN: &str = r#"package demo

/** Greets. */
fun greet(name: String): String {
    val message = "Hello, $name!"
    return message // done
}
"#;

const JAVA: &str = r#"package demo;

public class Main {
    public static void main(String[] args) {
        System.out.println("hi" + 'c' + 1.5);
    }
}
"#;

fn assert_disjoint(runs: &[HighlightRun]) {
    for pair in runs.windows(2) {
        assert!(
            pair[0].start + pair[0].len <= pair[1].start,
            "overlapping runs {pair:?}"
        );
    }
    for run in runs {
        assert!(run.len > 0, "empty run {run:?}");
    }
}

#[test]
fn runs_cover_each_offset_at_most_once() {
    for (file, text) in [("Main.kt", KOTLIN), ("Main.java", JAVA)] {
        let mut session = Session::new().file(file).text(text);
        let runs = session.handler.reparse();
        assert!(!runs.is_empty());
        assert_disjoint(&runs);
        let end = runs.last().map(|run| run.start + run.len).unwrap_or(0);
        assert!(end <= text.chars().count());
    }
}

#[test]
fn adjacent_equal_styles_merge_into_one_run() {
    let mut session = Session::new().file("Main.kt").text("// one comment");
    let runs = session.handler.reparse();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].start, 0);
    assert_eq!(runs[0].len, 14);
}

#[test]
fn reparse_of_unchanged_text_is_a_visual_no_op() {
    let mut session = Session::new().file("Main.kt").text(KOTLIN);
    let before = session.document().styles().to_vec();
    let first = session.handler.reparse();
    let second = session.handler.reparse();
    assert_eq!(first, second);
    assert_eq!(session.document().styles(), before.as_slice());
    session.assert_unlocked().assert_history(0, 0);
}

#[test]
fn reconcile_uses_one_lock_per_pass() {
    let mut session = Session::new().file("Main.java").text(JAVA);
    let locks = session.document().lock_count();
    session.handler.reparse();
    assert_eq!(session.document().lock_count(), locks + 1);
    session.assert_unlocked();
}

#[test]
fn styles_follow_categories() {
    let session = Session::new().file("Main.kt").text(KOTLIN);
    let scheme = session.handler.options().colors.clone();
    let style_at = |needle: &str| {
        let byte = KOTLIN.find(needle).unwrap();
        session.document().style_at(KOTLIN[..byte].chars().count())
    };

    assert_eq!(style_at("package"), Some(scheme.style(HighlightCategory::Keyword)));
    assert_eq!(style_at("/**"), Some(scheme.style(HighlightCategory::DocComment)));
    assert_eq!(style_at("greet"), Some(scheme.style(HighlightCategory::FunctionDeclaration)));
    assert_eq!(style_at("name:"), Some(scheme.style(HighlightCategory::Parameter)));
    assert_eq!(style_at("String"), Some(scheme.style(HighlightCategory::TypeName)));
    assert_eq!(style_at("message"), Some(scheme.style(HighlightCategory::Property)));
    assert_eq!(style_at("\"Hello"), Some(scheme.style(HighlightCategory::String)));
    assert_eq!(style_at("$name"), Some(scheme.style(HighlightCategory::StringTemplate)));
    assert_eq!(style_at("// done"), Some(scheme.style(HighlightCategory::LineComment)));
    assert_eq!(style_at("{\n"), Some(scheme.style(HighlightCategory::Braces)));
}

#[test]
fn token_highlighting_alone() {
    let session = Session::with_options(EditorOptions {
        semantic_highlighting: false,
        ..EditorOptions::default()
    })
    .file("Main.kt")
    .text(KOTLIN);
    let scheme = &session.handler.options().colors;
    let offset = KOTLIN.find("greet").unwrap();
    assert_eq!(
        session.document().style_at(offset),
        Some(scheme.style(HighlightCategory::Identifier))
    );
}

#[test]
fn edits_rehighlight_the_new_text() {
    let mut session = Session::new().file("Main.java").text("int x;");
    let scheme = session.handler.options().colors.clone();
    session.handler.set_caret(0);
    session.handler.insert(0, "// ");
    let doc = session.document();
    assert!((0..doc.styles().len())
        .all(|offset| doc.style_at(offset) == Some(scheme.style(HighlightCategory::LineComment))));
}

#[test]
fn broken_source_still_highlights() {
    let mut session = Session::new().file("Main.java").text("class { void (");
    let runs = session.handler.reparse();
    assert_disjoint(&runs);
    assert!(!runs.is_empty());
    session.assert_unlocked();
}
