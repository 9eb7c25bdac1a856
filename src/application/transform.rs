//! Transform selection use case
//!
//! One run: capture the selection, send it to the shortcut's backend,
//! paste the result over the selection.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::shortcut::{ShortcutDefinition, ShortcutRegistry};
use crate::domain::transform::{
    InvalidStateTransition, TransformRequest, TransformSession, TransformState,
};

use super::ports::{
    BackendError, Clipboard, ClipboardError, Keystroke, NotificationIcon, Notifier, TextBackend,
};
use super::selection::{Capture, SelectionBridge};

/// Application name used as notification title prefix
pub const APP_NAME: &str = "bettrWrite";

/// Errors from a transformation run
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Shortcut '{0}' not configured")]
    UnknownShortcut(String),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Successful run outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The selection was replaced with `chars` characters of output
    Replaced { chars: usize },
    /// Nothing was selected; no backend call was made
    NothingSelected,
}

/// Runs shortcuts against the current selection
pub struct TransformEngine<C, K, B, N>
where
    C: Clipboard,
    K: Keystroke,
    B: TextBackend,
    N: Notifier,
{
    bridge: SelectionBridge<C, K>,
    backend: B,
    notifier: N,
    registry: Arc<ShortcutRegistry>,
    session: Mutex<TransformSession>,
}

impl<C, K, B, N> TransformEngine<C, K, B, N>
where
    C: Clipboard,
    K: Keystroke,
    B: TextBackend,
    N: Notifier,
{
    pub fn new(
        bridge: SelectionBridge<C, K>,
        backend: B,
        notifier: N,
        registry: Arc<ShortcutRegistry>,
    ) -> Self {
        Self {
            bridge,
            backend,
            notifier,
            registry,
            session: Mutex::new(TransformSession::new()),
        }
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Current phase of the run in progress, `Idle` between runs
    pub async fn state(&self) -> TransformState {
        self.session.lock().await.state()
    }

    /// Run the shortcut with the given id against the current selection.
    ///
    /// Runs are serialized: a second call waits for the first to finish.
    /// Every failure is reported through a notification before it is
    /// returned, and the clipboard is restored on every path that
    /// touched it.
    pub async fn run(&self, shortcut_id: &str) -> Result<TransformOutcome, TransformError> {
        let Some(shortcut) = self.registry.by_id(shortcut_id) else {
            error!(shortcut = shortcut_id, "shortcut not configured");
            let err = TransformError::UnknownShortcut(shortcut_id.to_string());
            self.notify("Error", &err.to_string(), NotificationIcon::Error)
                .await;
            return Err(err);
        };

        let mut session = self.session.lock().await;
        session.begin_capture()?;
        info!(
            shortcut = shortcut.id(),
            backend = %shortcut.backend(),
            model = shortcut.model(),
            "running shortcut"
        );

        let result = self.execute(&mut session, shortcut).await;

        match &result {
            Ok(TransformOutcome::Replaced { chars }) => {
                session.complete()?;
                info!(shortcut = shortcut.id(), chars, "selection replaced");
                self.notify("Success", "Text processed and replaced", NotificationIcon::Success)
                    .await;
            }
            Ok(TransformOutcome::NothingSelected) => {
                session.fail()?;
                session.reset()?;
                info!(shortcut = shortcut.id(), "no text selected");
                self.notify("Info", "No text selected", NotificationIcon::Info)
                    .await;
            }
            Err(e) => {
                error!(
                    shortcut = shortcut.id(),
                    backend = %shortcut.backend(),
                    phase = %session.state(),
                    error = %e,
                    "shortcut failed"
                );
                session.fail()?;
                session.reset()?;
                self.notify("Error", &failure_message(shortcut, e), NotificationIcon::Error)
                    .await;
            }
        }

        result
    }

    async fn execute(
        &self,
        session: &mut TransformSession,
        shortcut: &ShortcutDefinition,
    ) -> Result<TransformOutcome, TransformError> {
        let (text, snapshot) = match self.bridge.capture_selection().await? {
            Capture::Selected { text, snapshot } => (text, snapshot),
            Capture::NothingSelected => return Ok(TransformOutcome::NothingSelected),
        };

        let request = TransformRequest::new(&text, shortcut);
        debug!(chars = request.char_count(), "dispatching selection");
        self.notify("Processing", "Processing text...", NotificationIcon::Processing)
            .await;

        let transformed = match session.begin_dispatch() {
            Ok(()) => self.backend.transform(&request).await.map_err(TransformError::from),
            Err(e) => Err(e.into()),
        };
        let transformed = match transformed {
            Ok(t) => t,
            Err(e) => {
                self.bridge.restore_quietly(snapshot).await;
                return Err(e);
            }
        };

        if let Err(e) = session.begin_replace() {
            self.bridge.restore_quietly(snapshot).await;
            return Err(e.into());
        }
        if transformed.is_empty() {
            warn!(shortcut = shortcut.id(), "backend returned empty text");
        }
        self.bridge.replace_selection(&transformed, snapshot).await?;

        Ok(TransformOutcome::Replaced {
            chars: transformed.chars().count(),
        })
    }

    /// Show a notification titled `bettrWrite - <title>`. Failures are logged only.
    pub async fn notify(&self, title: &str, message: &str, icon: NotificationIcon) {
        let title = format!("{} - {}", APP_NAME, title);
        if let Err(e) = self.notifier.notify(&title, message, icon).await {
            warn!(error = %e, "notification failed");
        }
    }
}

fn failure_message(shortcut: &ShortcutDefinition, error: &TransformError) -> String {
    match error {
        TransformError::Backend(e) => {
            format!("{} failed for '{}': {}", shortcut.backend().label(), shortcut.id(), e)
        }
        other => other.to_string(),
    }
}
