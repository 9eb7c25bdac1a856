//! Keystroke port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("{0} not found. Please install it or choose another keystroke tool.")]
    ToolNotFound(String),

    #[error("Failed to send {chord}: {message}")]
    SendFailed { chord: EditChord, message: String },
}

/// Editing shortcuts the bridge needs to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChord {
    Copy,
    Paste,
}

impl EditChord {
    /// Letter pressed together with the platform's command modifier
    pub const fn letter(&self) -> char {
        match self {
            Self::Copy => 'c',
            Self::Paste => 'v',
        }
    }

    /// Linux input event code of the letter (KEY_C / KEY_V)
    pub const fn evdev_code(&self) -> u16 {
        match self {
            Self::Copy => 46,
            Self::Paste => 47,
        }
    }
}

impl fmt::Display for EditChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(target_os = "macos")]
        let modifier = "cmd";
        #[cfg(not(target_os = "macos"))]
        let modifier = "ctrl";

        write!(f, "{}+{}", modifier, self.letter())
    }
}

/// Port for simulating keyboard shortcuts in the focused window
#[async_trait]
pub trait Keystroke: Send + Sync {
    /// Press and release the given editing chord.
    async fn send_chord(&self, chord: EditChord) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl Keystroke for Box<dyn Keystroke> {
    async fn send_chord(&self, chord: EditChord) -> Result<(), KeystrokeError> {
        self.as_ref().send_chord(chord).await
    }
}
