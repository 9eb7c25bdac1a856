//! Keystroke adapters backed by external tools (Linux)
//!
//! - xdotool: X11
//! - wtype: Wayland compositors with virtual-keyboard support
//! - ydotool: any session, needs the ydotoold daemon and access to uinput

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{EditChord, Keystroke, KeystrokeError};

/// Linux evdev code of the left control key
const KEY_LEFTCTRL: u16 = 29;

/// External keystroke tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTool {
    Xdotool,
    Wtype,
    Ydotool,
}

impl CommandTool {
    /// Binary name
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Xdotool => "xdotool",
            Self::Wtype => "wtype",
            Self::Ydotool => "ydotool",
        }
    }

    /// Arguments that press and release `chord`
    pub fn chord_args(&self, chord: EditChord) -> Vec<String> {
        let letter = chord.letter().to_string();
        match self {
            Self::Xdotool => vec![
                "key".to_string(),
                "--clearmodifiers".to_string(),
                format!("ctrl+{}", letter),
            ],
            Self::Wtype => vec![
                "-M".to_string(),
                "ctrl".to_string(),
                "-k".to_string(),
                letter,
                "-m".to_string(),
                "ctrl".to_string(),
            ],
            Self::Ydotool => {
                let code = chord.evdev_code();
                vec![
                    "key".to_string(),
                    format!("{}:1", KEY_LEFTCTRL),
                    format!("{}:1", code),
                    format!("{}:0", code),
                    format!("{}:0", KEY_LEFTCTRL),
                ]
            }
        }
    }
}

impl fmt::Display for CommandTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Keystroke adapter that shells out to a [`CommandTool`]
#[derive(Debug, Clone, Copy)]
pub struct CommandKeystroke {
    tool: CommandTool,
}

impl CommandKeystroke {
    pub fn new(tool: CommandTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> CommandTool {
        self.tool
    }
}

#[async_trait]
impl Keystroke for CommandKeystroke {
    async fn send_chord(&self, chord: EditChord) -> Result<(), KeystrokeError> {
        let program = self.tool.program();
        let status = Command::new(program)
            .args(self.tool.chord_args(chord))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeystrokeError::ToolNotFound(program.to_string())
                } else {
                    KeystrokeError::SendFailed {
                        chord,
                        message: e.to_string(),
                    }
                }
            })?;

        if !status.success() {
            return Err(KeystrokeError::SendFailed {
                chord,
                message: format!("{} exited with status: {}", program, status),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdotool_args() {
        assert_eq!(
            CommandTool::Xdotool.chord_args(EditChord::Copy),
            ["key", "--clearmodifiers", "ctrl+c"]
        );
    }

    #[test]
    fn wtype_holds_ctrl_around_letter() {
        assert_eq!(
            CommandTool::Wtype.chord_args(EditChord::Paste),
            ["-M", "ctrl", "-k", "v", "-m", "ctrl"]
        );
    }

    #[test]
    fn ydotool_uses_evdev_codes() {
        assert_eq!(
            CommandTool::Ydotool.chord_args(EditChord::Copy),
            ["key", "29:1", "46:1", "46:0", "29:0"]
        );
        assert_eq!(
            CommandTool::Ydotool.chord_args(EditChord::Paste),
            ["key", "29:1", "47:1", "47:0", "29:0"]
        );
    }
}
