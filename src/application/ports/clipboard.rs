//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use super::keystroke::KeystrokeError;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Please install wl-clipboard.")]
    ToolNotFound(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),

    #[error("Keystroke simulation failed: {0}")]
    Keystroke(#[from] KeystrokeError),
}

/// Port for system clipboard access
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Read the clipboard's text content.
    ///
    /// # Returns
    /// `Ok(None)` when the clipboard holds no text
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Empty the clipboard.
    async fn clear(&self) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        self.as_ref().clear().await
    }
}
