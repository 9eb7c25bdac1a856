//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod hotkey;
pub mod keystroke;
pub mod notifier;

// Re-export common types
pub use backend::{BackendError, TextBackend};
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use hotkey::{HotkeyError, HotkeyId, HotkeySource};
pub use keystroke::{EditChord, Keystroke, KeystrokeError};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
