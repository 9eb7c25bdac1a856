//! Global hotkey listener
//!
//! Binds every shortcut's key combination plus the quit combination,
//! then turns presses into runs. Runs never overlap: presses that
//! arrive while one is in progress are queued in arrival order.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::shortcut::{KeyCombination, ShortcutRegistry};

use super::ports::{HotkeyError, HotkeyId, HotkeySource};

/// How often the hotkey source is polled
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What a registered hotkey does
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    Quit,
    Shortcut(String),
}

/// A shortcut whose key combination could not be grabbed
#[derive(Debug)]
pub struct BindFailure {
    pub shortcut_id: String,
    pub error: HotkeyError,
}

/// Why the listener stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerExit {
    /// The quit combination was pressed
    QuitKeys,
    /// The shutdown future completed (signal)
    Shutdown,
}

pub struct HotkeyListener<S: HotkeySource> {
    source: S,
    bindings: HashMap<HotkeyId, Binding>,
}

impl<S: HotkeySource> HotkeyListener<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            bindings: HashMap::new(),
        }
    }

    /// Grab the quit combination
    pub fn bind_quit(&mut self, keys: &KeyCombination) -> Result<(), HotkeyError> {
        let id = self.source.register(keys)?;
        self.bindings.insert(id, Binding::Quit);
        debug!(keys = %keys, "quit combination bound");
        Ok(())
    }

    /// Grab every shortcut in the registry.
    ///
    /// A combination that cannot be grabbed is reported and skipped; the
    /// remaining shortcuts are still bound.
    pub fn bind_shortcuts(&mut self, registry: &ShortcutRegistry) -> Vec<BindFailure> {
        let mut failures = Vec::new();
        for shortcut in registry.iter() {
            match self.source.register(shortcut.keys()) {
                Ok(id) => {
                    info!(shortcut = shortcut.id(), keys = %shortcut.keys(), "shortcut bound");
                    self.bindings
                        .insert(id, Binding::Shortcut(shortcut.id().to_string()));
                }
                Err(error) => {
                    warn!(shortcut = shortcut.id(), error = %error, "failed to bind shortcut");
                    failures.push(BindFailure {
                        shortcut_id: shortcut.id().to_string(),
                        error,
                    });
                }
            }
        }
        failures
    }

    /// Number of shortcuts currently bound (the quit combination excluded)
    pub fn bound_shortcuts(&self) -> usize {
        self.bindings
            .values()
            .filter(|b| matches!(b, Binding::Shortcut(_)))
            .count()
    }

    /// Listen until the quit combination is pressed or `shutdown` completes.
    ///
    /// `on_trigger` is called with the shortcut id of each press, one at a
    /// time. Quitting does not wait for a run in progress; its future is
    /// dropped.
    pub async fn run<F, Fut, Sd>(&mut self, mut on_trigger: F, shutdown: Sd) -> ListenerExit
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = ()>,
        Sd: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut pending = VecDeque::new();

        loop {
            if let Some(exit) = self.drain(&mut pending) {
                return exit;
            }

            let shortcut_id = match pending.pop_front() {
                Some(id) => id,
                None => {
                    tokio::select! {
                        biased;
                        _ = &mut shutdown => return ListenerExit::Shutdown,
                        _ = sleep(POLL_INTERVAL) => {}
                    }
                    continue;
                }
            };

            debug!(shortcut = %shortcut_id, queued = pending.len(), "hotkey triggered");
            let run = on_trigger(shortcut_id);
            tokio::pin!(run);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => return ListenerExit::Shutdown,
                    _ = &mut run => break,
                    _ = sleep(POLL_INTERVAL) => {
                        if let Some(exit) = self.drain(&mut pending) {
                            return exit;
                        }
                    }
                }
            }
        }
    }

    /// Move pending presses from the source into the queue
    fn drain(&mut self, pending: &mut VecDeque<String>) -> Option<ListenerExit> {
        while let Some(id) = self.source.poll() {
            match self.bindings.get(&id) {
                Some(Binding::Quit) => {
                    info!("quit combination pressed");
                    return Some(ListenerExit::QuitKeys);
                }
                Some(Binding::Shortcut(shortcut_id)) => pending.push_back(shortcut_id.clone()),
                None => debug!(id, "press for unbound hotkey ignored"),
            }
        }
        None
    }
}
