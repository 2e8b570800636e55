use wren_config::{ColorScheme, ParagraphStyle, Settings};
use wren_text::PairPolicy;

/// The parts of [`Settings`] a [`crate::DocumentHandler`] reads.
///
/// Built from fully loaded settings before the handler exists, and replaced
/// wholesale through [`crate::DocumentHandler::reload`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub token_highlighting: bool,
    pub semantic_highlighting: bool,
    pub tab_size: usize,
    pub indent_with_spaces: bool,
    pub undo_limit: usize,
    pub colors: ColorScheme,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl EditorOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            token_highlighting: settings.highlight_token_based,
            semantic_highlighting: settings.highlight_semantic_based,
            tab_size: settings.tab_size,
            indent_with_spaces: settings.indent_with_spaces,
            undo_limit: settings.undo_limit,
            colors: settings.colors.clone(),
        }
    }

    pub fn paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            tab_size: self.tab_size,
        }
    }

    pub(crate) fn pair_policy(&self) -> PairPolicy {
        let policy = PairPolicy::default();
        if self.indent_with_spaces {
            policy.with_tab_expansion(self.tab_size)
        } else {
            policy
        }
    }
}
