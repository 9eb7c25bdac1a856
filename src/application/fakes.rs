//! In-memory port implementations shared by the use case tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::transform::TransformRequest;

use super::ports::{
    BackendError, Clipboard, ClipboardError, EditChord, Keystroke, KeystrokeError,
    NotificationError, NotificationIcon, Notifier, TextBackend,
};

/// Shared state of a simulated desktop: one clipboard, one focused
/// text field with a selection, and a log of what happened to them.
#[derive(Debug, Default)]
pub struct DesktopState {
    pub clipboard: Option<String>,
    pub selection: Option<String>,
    pub writes: Vec<String>,
    pub clears: usize,
    pub chords: Vec<EditChord>,
    pub pasted: Vec<String>,
    pub fail_copy: bool,
    pub fail_paste: bool,
    /// Fails the next clipboard write only
    pub fail_write: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeDesktop(Arc<Mutex<DesktopState>>);

impl FakeDesktop {
    pub fn new(clipboard: Option<&str>, selection: Option<&str>) -> Self {
        let desktop = Self::default();
        {
            let mut state = desktop.state();
            state.clipboard = clipboard.map(str::to_string);
            state.selection = selection.map(str::to_string);
        }
        desktop
    }

    pub fn state(&self) -> MutexGuard<'_, DesktopState> {
        self.0.lock().unwrap()
    }

    pub fn clipboard(&self) -> FakeClipboard {
        FakeClipboard(self.clone())
    }

    pub fn keystroke(&self) -> FakeKeystroke {
        FakeKeystroke(self.clone())
    }
}

pub struct FakeClipboard(FakeDesktop);

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self.0.state().clipboard.clone())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.0.state();
        if std::mem::take(&mut state.fail_write) {
            return Err(ClipboardError::WriteFailed("denied".to_string()));
        }
        state.writes.push(text.to_string());
        state.clipboard = Some(text.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        let mut state = self.0.state();
        state.clears += 1;
        state.clipboard = None;
        Ok(())
    }
}

/// Copy puts the selection on the clipboard, paste replaces the
/// selection with the clipboard content.
pub struct FakeKeystroke(FakeDesktop);

#[async_trait]
impl Keystroke for FakeKeystroke {
    async fn send_chord(&self, chord: EditChord) -> Result<(), KeystrokeError> {
        let mut state = self.0.state();
        state.chords.push(chord);
        match chord {
            EditChord::Copy if state.fail_copy => Err(KeystrokeError::SendFailed {
                chord,
                message: "no focus".to_string(),
            }),
            EditChord::Copy => {
                if let Some(selection) = state.selection.clone() {
                    state.clipboard = Some(selection);
                }
                Ok(())
            }
            EditChord::Paste if state.fail_paste => Err(KeystrokeError::SendFailed {
                chord,
                message: "no focus".to_string(),
            }),
            EditChord::Paste => {
                let content = state.clipboard.clone().unwrap_or_default();
                state.pasted.push(content.clone());
                state.selection = Some(content);
                Ok(())
            }
        }
    }
}

/// Backend returning scripted results and recording what it was asked
#[derive(Clone, Default)]
pub struct StubBackend {
    replies: Arc<Mutex<VecDeque<Result<String, BackendError>>>>,
    seen: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubBackend {
    pub fn replying(reply: Result<String, BackendError>) -> Self {
        let backend = Self::default();
        backend.replies.lock().unwrap().push_back(reply);
        backend
    }

    /// (shortcut id, text) pairs in call order
    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextBackend for StubBackend {
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError> {
        self.seen
            .lock()
            .unwrap()
            .push((request.shortcut().id().to_string(), request.text().to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(request.text().to_uppercase()))
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, NotificationIcon)>>>,
}

impl RecordingNotifier {
    pub fn icons(&self) -> Vec<NotificationIcon> {
        self.sent.lock().unwrap().iter().map(|(_, icon)| *icon).collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        title: &str,
        _message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push((title.to_string(), icon));
        Ok(())
    }
}
