//! Keystroke tool selection

use std::fmt;
use std::str::FromStr;

#[cfg(target_os = "linux")]
use std::path::PathBuf;
#[cfg(target_os = "linux")]
use std::process::Stdio;

#[cfg(target_os = "linux")]
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::{Keystroke, KeystrokeError};

#[cfg(target_os = "linux")]
use super::command::{CommandKeystroke, CommandTool};
use super::enigo::EnigoKeystroke;

/// Keystroke tool chosen by the user (`keystroke_tool` setting or `--keystroke-tool`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeystrokeToolPreference {
    /// Cross-platform enigo library
    #[default]
    Enigo,
    /// Pick a native tool for the current session (Linux), else enigo
    Auto,
    Xdotool,
    Wtype,
    Ydotool,
}

impl fmt::Display for KeystrokeToolPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enigo => "enigo",
            Self::Auto => "auto",
            Self::Xdotool => "xdotool",
            Self::Wtype => "wtype",
            Self::Ydotool => "ydotool",
        };
        f.write_str(name)
    }
}

/// Error type for parsing keystroke tool preference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid keystroke tool '{value}'. Valid options: enigo, auto, xdotool, wtype, ydotool")]
pub struct ParseKeystrokeToolError {
    pub value: String,
}

impl FromStr for KeystrokeToolPreference {
    type Err = ParseKeystrokeToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enigo" => Ok(Self::Enigo),
            "auto" => Ok(Self::Auto),
            "xdotool" => Ok(Self::Xdotool),
            "wtype" => Ok(Self::Wtype),
            "ydotool" => Ok(Self::Ydotool),
            _ => Err(ParseKeystrokeToolError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if a binary can be found on PATH
#[cfg(target_os = "linux")]
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// ydotool only works while ydotoold is listening on its socket
#[cfg(target_os = "linux")]
async fn is_ydotool_available() -> bool {
    let socket = std::env::var_os("YDOTOOL_SOCKET")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("XDG_RUNTIME_DIR").map(|d| PathBuf::from(d).join(".ydotool_socket"))
        })
        .unwrap_or_else(|| PathBuf::from("/tmp/.ydotool_socket"));

    socket.exists() && is_tool_available("ydotool").await
}

#[cfg(target_os = "linux")]
async fn is_available(tool: CommandTool) -> bool {
    match tool {
        CommandTool::Ydotool => is_ydotool_available().await,
        other => is_tool_available(other.program()).await,
    }
}

/// Native tool for the running session, if one is installed.
///
/// Wayland sessions try ydotool then wtype; X11 sessions try xdotool.
#[cfg(target_os = "linux")]
async fn detect_command_tool() -> Option<CommandTool> {
    let candidates: &[CommandTool] = if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &[CommandTool::Ydotool, CommandTool::Wtype]
    } else {
        &[CommandTool::Xdotool]
    };

    for &tool in candidates {
        if is_available(tool).await {
            return Some(tool);
        }
    }
    None
}

/// Create the keystroke adapter for a preference.
///
/// Returns the adapter together with the name of the tool in use.
/// Explicitly requested tools that are missing are an error; `auto`
/// falls back to enigo. Outside Linux every preference resolves to enigo.
pub async fn create_keystroke(
    preference: KeystrokeToolPreference,
) -> Result<(Box<dyn Keystroke>, &'static str), KeystrokeError> {
    #[cfg(not(target_os = "linux"))]
    {
        if preference != KeystrokeToolPreference::Enigo {
            warn!(preference = %preference, "native keystroke tools are Linux only, using enigo");
        }
        Ok((Box::new(EnigoKeystroke::new()), "enigo"))
    }

    #[cfg(target_os = "linux")]
    {
        let requested = match preference {
            KeystrokeToolPreference::Enigo => None,
            KeystrokeToolPreference::Auto => match detect_command_tool().await {
                Some(tool) => Some(tool),
                None => {
                    warn!("no native keystroke tool found, using enigo");
                    None
                }
            },
            KeystrokeToolPreference::Xdotool => Some(CommandTool::Xdotool),
            KeystrokeToolPreference::Wtype => Some(CommandTool::Wtype),
            KeystrokeToolPreference::Ydotool => Some(CommandTool::Ydotool),
        };

        match requested {
            None => Ok((Box::new(EnigoKeystroke::new()), "enigo")),
            Some(tool) => {
                if !is_available(tool).await {
                    return Err(KeystrokeError::ToolNotFound(tool.program().to_string()));
                }
                debug!(tool = %tool, "using keystroke tool");
                Ok((Box::new(CommandKeystroke::new(tool)), tool.program()))
            }
        }
    }
}
