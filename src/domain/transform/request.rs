//! Transformation request value object

use crate::domain::shortcut::ShortcutDefinition;

/// Selected text paired with the shortcut that should transform it.
/// Lives for the duration of one run only.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    text: &'a str,
    shortcut: &'a ShortcutDefinition,
}

impl<'a> TransformRequest<'a> {
    pub fn new(text: &'a str, shortcut: &'a ShortcutDefinition) -> Self {
        Self { text, shortcut }
    }

    /// The captured selection
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn shortcut(&self) -> &'a ShortcutDefinition {
        self.shortcut
    }

    /// Length of the selection in characters, for logging
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
