//! Hotkey source port interface

use thiserror::Error;

use crate::domain::shortcut::KeyCombination;

/// Identifier assigned to a registered combination by the hotkey source
pub type HotkeyId = u32;

/// Hotkey errors
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Global hotkeys unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported key '{key}' in {keys}")]
    UnsupportedKey { keys: String, key: String },

    #[error("Failed to register {keys}: {message}")]
    RegistrationFailed { keys: String, message: String },
}

/// Port for OS-level global hotkeys
pub trait HotkeySource {
    /// Grab a key combination.
    ///
    /// # Returns
    /// The id that `poll` will report when the combination is pressed
    fn register(&mut self, keys: &KeyCombination) -> Result<HotkeyId, HotkeyError>;

    /// Next pending press, if any. Never blocks.
    fn poll(&mut self) -> Option<HotkeyId>;
}
