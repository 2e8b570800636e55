use crate::terminal::TerminalDocument;
use anyhow::{Context, Result};
use std::{io::Write, path::Path};
use tracing::info;
use wren::{DocumentHandler, EditorOptions};
use wren_config::Settings;

/// Which passes to run on top of what the settings enable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightArgs {
    pub no_lexical: bool,
    pub no_semantic: bool,
    pub line_numbers: bool,
}

/// Load `file` into a handler backed by a [`TerminalDocument`] and return
/// the rendered, colored text.
pub fn render(file: &Path, settings: &Settings, args: HighlightArgs) -> Result<String> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read source file: {}", file.display()))?;

    let mut options = EditorOptions::from_settings(settings);
    options.token_highlighting &= !args.no_lexical;
    options.semantic_highlighting &= !args.no_semantic;

    let mut handler = DocumentHandler::new(TerminalDocument::new(), options);
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let language = handler.switch_language(&file_name);
    handler.load(&text);
    info!(
        file = %file.display(),
        language = language.map(|l| l.name()),
        len = handler.len(),
        "highlighted file"
    );

    Ok(handler.document().render(args.line_numbers))
}

pub fn run(
    file: &Path,
    args: HighlightArgs,
    mut settings: Settings,
    settings_path: Option<&Path>,
    remember: bool,
) -> Result<()> {
    let rendered = render(file, &settings, args)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("Failed to write to stdout")?;

    if remember {
        let path = settings_path.context("No settings path to remember the file in")?;
        let absolute = std::fs::canonicalize(file)
            .with_context(|| format!("Failed to resolve path: {}", file.display()))?;
        settings.remember_file(&absolute);
        settings.save(path)?;
    }
    Ok(())
}
