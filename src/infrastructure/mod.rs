//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the clipboard, the
//! language-model HTTP APIs and OS hotkeys.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod hotkey;
pub mod keystroke;
pub mod notification;

// Re-export adapters
pub use backend::{BackendRouter, HostedApiBackend, LocalApiBackend};
pub use clipboard::{create_clipboard, ArboardClipboard, ClipboardTool, WaylandClipboard};
pub use config::XdgConfigStore;
pub use hotkey::GlobalHotkeySource;
pub use keystroke::{create_keystroke, EnigoKeystroke, KeystrokeToolPreference};
pub use notification::{create_notifier, DisabledNotifier, NotifyRustNotifier, NotifySendNotifier};
