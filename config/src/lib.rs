//! Settings for the Wren editor.
//!
//! Settings are read from `settings.toml` and control both the highlighting
//! pipeline (which passes run, tab size, colors) and the small amount of
//! state the editor persists between sessions (last opened file, recent
//! files, window bounds).
//!
//! # Loading order
//!
//! 1. [`Settings::load_with_overrides`] picks the file: CLI override > discovered path > defaults
//! 2. Editor components are constructed from the loaded [`Settings`] afterwards, so nothing
//!    ever reads settings before they are loaded
//!
//! # Testing
//!
//! Tests use [`Settings::load()`] with explicit paths to temporary directories.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod scheme;
pub mod style;

pub use scheme::{ColorScheme, HighlightCategory};
pub use style::{Color, ParagraphStyle, Style};

const RECENT_FILES_CAP: usize = 10;

/// Editor settings, loaded from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Color tokens from the lexer on every edit.
    pub highlight_token_based: bool,

    /// Annotate the syntax tree on every edit.
    pub highlight_semantic_based: bool,

    /// Width of a tab stop, in columns.
    pub tab_size: usize,

    /// Replace a typed tab with `tab_size` spaces.
    pub indent_with_spaces: bool,

    /// Maximum number of content edits kept for undo.
    pub undo_limit: usize,

    pub last_opened_file: Option<PathBuf>,

    /// Most recent first.
    pub recent_files: Vec<PathBuf>,

    pub window_bounds: Option<WindowBounds>,

    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_token_based: true,
            highlight_semantic_based: true,
            tab_size: 4,
            indent_with_spaces: false,
            undo_limit: 100,
            last_opened_file: None,
            recent_files: Vec::new(),
            window_bounds: None,
            colors: ColorScheme::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Settings {
    /// Read and deserialize a TOML settings file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Load settings with priority: CLI override > discovered path > defaults.
    ///
    /// A discovered path that does not exist yet falls back to defaults; an
    /// explicit override must exist.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        match discovered_path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Serialize to TOML and write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// `<config_dir>/wren/settings.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wren").join("settings.toml"))
    }

    /// Record `path` as the last opened file and move it to the front of
    /// the recent list.
    pub fn remember_file(&mut self, path: &Path) {
        self.last_opened_file = Some(path.to_path_buf());
        self.recent_files.retain(|recent| recent != path);
        self.recent_files.insert(0, path.to_path_buf());
        self.recent_files.truncate(RECENT_FILES_CAP);
    }

    pub fn paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            tab_size: self.tab_size,
        }
    }
}
