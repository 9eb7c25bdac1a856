//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};

/// Cross-platform clipboard adapter using arboard.
///
/// The arboard handle is opened on first use and kept for the adapter's
/// lifetime. On X11 the clipboard owner must stay alive for pasted
/// content to be served to other windows.
#[derive(Clone, Default)]
pub struct ArboardClipboard {
    handle: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a blocking clipboard operation on the shared handle
    async fn with_handle<T, F>(&self, op: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&mut arboard::Clipboard) -> Result<T, ClipboardError> + Send + 'static,
    {
        let handle = Arc::clone(&self.handle);

        tokio::task::spawn_blocking(move || {
            let mut guard = handle
                .lock()
                .map_err(|_| ClipboardError::ClipboardUnavailable("handle poisoned".to_string()))?;
            if guard.is_none() {
                let clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;
                *guard = Some(clipboard);
            }
            match guard.as_mut() {
                Some(clipboard) => op(clipboard),
                None => Err(ClipboardError::ClipboardUnavailable(
                    "clipboard not initialized".to_string(),
                )),
            }
        })
        .await
        .map_err(|e| ClipboardError::ClipboardUnavailable(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.with_handle(|clipboard| match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
        })
        .await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        self.with_handle(move |clipboard| {
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        self.with_handle(|clipboard| {
            clipboard
                .clear()
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_is_opened_lazily() {
        let clipboard = ArboardClipboard::new();
        assert!(clipboard.handle.lock().unwrap().is_none());
    }
}
