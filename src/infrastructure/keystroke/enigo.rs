//! Cross-platform keystroke adapter using enigo
//!
//! Works on Windows, macOS, and Linux (X11; Wayland through XWayland only).

use async_trait::async_trait;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::application::ports::{EditChord, Keystroke, KeystrokeError};

/// Modifier that goes with copy and paste on this platform
#[cfg(target_os = "macos")]
const COMMAND_KEY: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const COMMAND_KEY: Key = Key::Control;

/// Cross-platform keystroke adapter using enigo
#[derive(Debug, Default)]
pub struct EnigoKeystroke;

impl EnigoKeystroke {
    /// Create a new enigo keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

fn press_chord(chord: EditChord) -> Result<(), KeystrokeError> {
    let failed = |message: String| KeystrokeError::SendFailed { chord, message };

    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| failed(format!("Failed to create enigo: {}", e)))?;

    enigo
        .key(COMMAND_KEY, Direction::Press)
        .map_err(|e| failed(e.to_string()))?;
    let clicked = enigo.key(Key::Unicode(chord.letter()), Direction::Click);
    // Always let go of the modifier, even if the letter failed
    let released = enigo.key(COMMAND_KEY, Direction::Release);

    clicked
        .and(released)
        .map_err(|e| failed(e.to_string()))
}

#[async_trait]
impl Keystroke for EnigoKeystroke {
    async fn send_chord(&self, chord: EditChord) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || press_chord(chord))
            .await
            .map_err(|e| KeystrokeError::SendFailed {
                chord,
                message: format!("Task join error: {}", e),
            })?
    }
}
