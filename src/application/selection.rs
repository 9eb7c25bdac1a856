//! Selection capture and replacement through the system clipboard
//!
//! The focused application is driven with simulated copy and paste
//! chords. Whatever the user had on the clipboard before a run is put
//! back once the run is over, whether it succeeded or not.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::ports::{Clipboard, ClipboardError, EditChord, Keystroke};

/// Delays that give the focused application time to react to a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTimings {
    /// Wait after sending copy before reading the clipboard
    pub copy_settle: Duration,
    /// Wait after writing the clipboard before sending paste
    pub paste_settle: Duration,
    /// Wait after paste before restoring the previous clipboard
    pub restore_grace: Duration,
}

impl BridgeTimings {
    /// No waiting at all
    pub const fn immediate() -> Self {
        Self {
            copy_settle: Duration::ZERO,
            paste_settle: Duration::ZERO,
            restore_grace: Duration::ZERO,
        }
    }
}

impl Default for BridgeTimings {
    fn default() -> Self {
        Self {
            copy_settle: Duration::from_millis(100),
            paste_settle: Duration::from_millis(50),
            restore_grace: Duration::from_millis(100),
        }
    }
}

/// Clipboard content saved at the start of a run.
///
/// Owned by the run that took it and consumed by restoration.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a snapshot must be handed back to the bridge for restoration"]
pub struct ClipboardSnapshot {
    content: Option<String>,
}

impl ClipboardSnapshot {
    /// Text that was on the clipboard, if any
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// Result of a capture attempt
#[derive(Debug)]
pub enum Capture {
    /// The selection was copied. The snapshot must later be passed to
    /// `replace_selection` or `restore`.
    Selected {
        text: String,
        snapshot: ClipboardSnapshot,
    },
    /// Nothing was selected; the clipboard has already been restored
    NothingSelected,
}

/// Reads and writes the focused application's selection
pub struct SelectionBridge<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    clipboard: C,
    keystroke: K,
    timings: BridgeTimings,
}

impl<C, K> SelectionBridge<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    pub fn new(clipboard: C, keystroke: K) -> Self {
        Self::with_timings(clipboard, keystroke, BridgeTimings::default())
    }

    pub fn with_timings(clipboard: C, keystroke: K, timings: BridgeTimings) -> Self {
        Self {
            clipboard,
            keystroke,
            timings,
        }
    }

    /// Copy the current selection.
    ///
    /// The clipboard is saved first and cleared, so that an empty read
    /// after copy reliably means nothing was selected. On any failure
    /// after the save the clipboard is restored before the error is
    /// returned.
    pub async fn capture_selection(&self) -> Result<Capture, ClipboardError> {
        let snapshot = ClipboardSnapshot {
            content: self.clipboard.read_text().await?,
        };
        debug!(
            had_text = snapshot.content.is_some(),
            "saved clipboard before capture"
        );

        match self.copy_selection().await {
            Ok(Some(text)) if !text.is_empty() => {
                debug!(chars = text.chars().count(), "selection copied");
                Ok(Capture::Selected { text, snapshot })
            }
            Ok(_) => {
                debug!("clipboard empty after copy");
                self.restore(snapshot).await?;
                Ok(Capture::NothingSelected)
            }
            Err(e) => {
                self.restore_quietly(snapshot).await;
                Err(e)
            }
        }
    }

    async fn copy_selection(&self) -> Result<Option<String>, ClipboardError> {
        self.clipboard.clear().await?;
        self.keystroke.send_chord(EditChord::Copy).await?;
        sleep(self.timings.copy_settle).await;
        self.clipboard.read_text().await
    }

    /// Paste `text` over the selection, then put the saved clipboard back.
    ///
    /// Restoration is attempted even when writing or pasting fails; the
    /// paste error takes precedence over a restore error.
    pub async fn replace_selection(
        &self,
        text: &str,
        snapshot: ClipboardSnapshot,
    ) -> Result<(), ClipboardError> {
        let pasted = self.paste(text).await;
        if let Err(e) = &pasted {
            warn!(error = %e, "paste failed, restoring clipboard");
        }
        let restored = self.restore(snapshot).await;
        pasted.and(restored)
    }

    async fn paste(&self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.write_text(text).await?;
        sleep(self.timings.paste_settle).await;
        self.keystroke.send_chord(EditChord::Paste).await?;
        sleep(self.timings.restore_grace).await;
        Ok(())
    }

    /// Put the saved clipboard content back.
    /// A snapshot without text restores an empty clipboard.
    pub async fn restore(&self, snapshot: ClipboardSnapshot) -> Result<(), ClipboardError> {
        match snapshot.content {
            Some(content) => self.clipboard.write_text(&content).await,
            None => self.clipboard.clear().await,
        }?;
        debug!("clipboard restored");
        Ok(())
    }

    /// Restore and log instead of failing
    pub async fn restore_quietly(&self, snapshot: ClipboardSnapshot) {
        if let Err(e) = self.restore(snapshot).await {
            warn!(error = %e, "failed to restore clipboard");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeClipboard, FakeDesktop, FakeKeystroke};

    fn bridge(desktop: &FakeDesktop) -> SelectionBridge<FakeClipboard, FakeKeystroke> {
        SelectionBridge::with_timings(
            desktop.clipboard(),
            desktop.keystroke(),
            BridgeTimings::immediate(),
        )
    }

    #[tokio::test]
    async fn capture_returns_selection_and_snapshot() {
        let desktop = FakeDesktop::new(Some("earlier copy"), Some("the cat sat"));
        let bridge = bridge(&desktop);

        match bridge.capture_selection().await.unwrap() {
            Capture::Selected { text, snapshot } => {
                assert_eq!(text, "the cat sat");
                assert_eq!(snapshot.content(), Some("earlier copy"));
                bridge.restore(snapshot).await.unwrap();
            }
            Capture::NothingSelected => panic!("expected a selection"),
        }

        assert_eq!(desktop.state().chords, [EditChord::Copy]);
        assert_eq!(desktop.state().clears, 1);
        assert_eq!(desktop.state().clipboard.as_deref(), Some("earlier copy"));
    }

    #[tokio::test]
    async fn nothing_selected_restores_previous_content() {
        let desktop = FakeDesktop::new(Some("keep me"), None);
        let bridge = bridge(&desktop);

        let capture = bridge.capture_selection().await.unwrap();

        // Stale content was cleared before the copy chord, so it is not
        // mistaken for a selection.
        assert!(matches!(capture, Capture::NothingSelected));
        assert_eq!(desktop.state().clears, 1);
        assert_eq!(desktop.state().clipboard.as_deref(), Some("keep me"));
    }

    #[tokio::test]
    async fn empty_clipboard_is_restored_empty() {
        let desktop = FakeDesktop::new(None, None);
        let bridge = bridge(&desktop);

        let capture = bridge.capture_selection().await.unwrap();

        assert!(matches!(capture, Capture::NothingSelected));
        assert_eq!(desktop.state().clipboard, None);
        assert!(desktop.state().writes.is_empty());
    }

    #[tokio::test]
    async fn copy_failure_restores_before_erroring() {
        let desktop = FakeDesktop::new(Some("keep me"), Some("text"));
        desktop.state().fail_copy = true;
        let bridge = bridge(&desktop);

        let err = bridge.capture_selection().await.unwrap_err();

        assert!(matches!(err, ClipboardError::Keystroke(_)));
        assert_eq!(desktop.state().clipboard.as_deref(), Some("keep me"));
    }

    #[tokio::test]
    async fn replace_pastes_then_restores() {
        let desktop = FakeDesktop::new(Some("keep me"), Some("teh cat"));
        let bridge = bridge(&desktop);

        let Capture::Selected { snapshot, .. } = bridge.capture_selection().await.unwrap() else {
            panic!("expected a selection");
        };
        bridge.replace_selection("The cat.", snapshot).await.unwrap();

        let state = desktop.state();
        assert_eq!(state.pasted, ["The cat."]);
        assert_eq!(state.selection.as_deref(), Some("The cat."));
        assert_eq!(state.clipboard.as_deref(), Some("keep me"));
        assert_eq!(state.chords, [EditChord::Copy, EditChord::Paste]);
    }

    #[tokio::test]
    async fn paste_failure_still_restores() {
        let desktop = FakeDesktop::new(Some("keep me"), Some("teh cat"));
        let bridge = bridge(&desktop);

        let Capture::Selected { snapshot, .. } = bridge.capture_selection().await.unwrap() else {
            panic!("expected a selection");
        };
        desktop.state().fail_paste = true;
        let err = bridge.replace_selection("The cat.", snapshot).await.unwrap_err();

        assert!(matches!(err, ClipboardError::Keystroke(_)));
        assert_eq!(desktop.state().clipboard.as_deref(), Some("keep me"));
        assert!(desktop.state().pasted.is_empty());
    }

    #[tokio::test]
    async fn write_failure_skips_paste_and_restores() {
        let desktop = FakeDesktop::new(Some("keep me"), Some("teh cat"));
        let bridge = bridge(&desktop);

        let Capture::Selected { snapshot, .. } = bridge.capture_selection().await.unwrap() else {
            panic!("expected a selection");
        };
        desktop.state().fail_write = true;
        let err = bridge.replace_selection("The cat.", snapshot).await.unwrap_err();

        let state = desktop.state();
        assert!(matches!(err, ClipboardError::WriteFailed(_)));
        assert_eq!(state.chords, [EditChord::Copy]);
        assert!(state.pasted.is_empty());
        assert_eq!(state.writes, ["keep me"]);
        assert_eq!(state.clipboard.as_deref(), Some("keep me"));
        assert_eq!(state.selection.as_deref(), Some("teh cat"));
    }

    #[tokio::test]
    async fn replace_with_empty_snapshot_clears() {
        let desktop = FakeDesktop::new(None, Some("x"));
        let bridge = bridge(&desktop);

        let Capture::Selected { snapshot, .. } = bridge.capture_selection().await.unwrap() else {
            panic!("expected a selection");
        };
        bridge.replace_selection("y", snapshot).await.unwrap();

        assert_eq!(desktop.state().clipboard, None);
        assert_eq!(desktop.state().selection.as_deref(), Some("y"));
    }
}
