//! Wayland clipboard adapter using wl-clipboard (wl-copy / wl-paste)

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{Clipboard, ClipboardError};

/// Wayland clipboard adapter using the wl-clipboard tools
pub struct WaylandClipboard;

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(tool: &str, e: io::Error, wrap: fn(String) -> ClipboardError) -> ClipboardError {
    if e.kind() == io::ErrorKind::NotFound {
        ClipboardError::ToolNotFound(tool.to_string())
    } else {
        wrap(e.to_string())
    }
}

/// Whether wl-paste's stderr says there is no text to paste
fn reports_empty_clipboard(stderr: &str) -> bool {
    const EMPTY_MARKERS: &[&str] = &[
        "Nothing is copied",
        "No selection",
        "No suitable type of content copied",
    ];
    EMPTY_MARKERS.iter().any(|marker| stderr.contains(marker))
}

#[async_trait]
impl Clipboard for WaylandClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let output = Command::new("wl-paste")
            .args(["--no-newline", "--type", "text"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error("wl-paste", e, ClipboardError::ReadFailed))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if reports_empty_clipboard(&stderr) {
                return Ok(None);
            }
            return Err(ClipboardError::ReadFailed(format!(
                "wl-paste failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map(Some)
            .map_err(|e| ClipboardError::ReadFailed(e.to_string()))
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new("wl-copy")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("wl-copy", e, ClipboardError::WriteFailed))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::WriteFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        let status = Command::new("wl-copy")
            .arg("--clear")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| spawn_error("wl-copy", e, ClipboardError::WriteFailed))?;

        if !status.success() {
            return Err(ClipboardError::WriteFailed(format!(
                "wl-copy --clear exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
