use anyhow::{Context, Result};
use std::{io::Write, path::Path};
use wren_language::Language;

/// One line per token: `start..end kind text`, with the text debug-escaped.
pub fn format_tokens(language: Language, text: &str) -> String {
    let mut out = String::new();
    for token in language.lexer(text) {
        out.push_str(&format!(
            "{}..{} {} {:?}\n",
            token.start,
            token.end,
            token.kind.as_str(),
            token.text
        ));
    }
    out
}

pub fn run(file: &Path) -> Result<()> {
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let Some(language) = Language::detect(&file_name) else {
        anyhow::bail!("No language for file: {}", file.display());
    };
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read source file: {}", file.display()))?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", format_tokens(language, &text)).context("Failed to write to stdout")?;
    Ok(())
}
