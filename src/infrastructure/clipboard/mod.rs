//! Clipboard infrastructure module
//!
//! arboard is the default on every platform; on Wayland the
//! wl-clipboard tools can be selected instead.

mod arboard;
mod wayland;

use std::fmt;
use std::str::FromStr;

pub use arboard::ArboardClipboard;
pub use wayland::WaylandClipboard;

use crate::application::ports::Clipboard;

/// Available clipboard backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardTool {
    #[default]
    Arboard,
    WlClipboard,
}

impl fmt::Display for ClipboardTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardTool::Arboard => write!(f, "arboard"),
            ClipboardTool::WlClipboard => write!(f, "wl-clipboard"),
        }
    }
}

/// Error type for parsing a clipboard tool name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clipboard tool '{value}'. Valid options: arboard, wl-clipboard")]
pub struct ParseClipboardToolError {
    pub value: String,
}

impl FromStr for ClipboardTool {
    type Err = ParseClipboardToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(ClipboardTool::Arboard),
            "wl-clipboard" | "wl-copy" | "wayland" => Ok(ClipboardTool::WlClipboard),
            _ => Err(ParseClipboardToolError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the clipboard adapter for the given tool
pub fn create_clipboard(tool: ClipboardTool) -> Box<dyn Clipboard> {
    match tool {
        ClipboardTool::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardTool::WlClipboard => Box::new(WaylandClipboard::new()),
    }
}
