//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod listener;
pub mod ports;
pub mod selection;
pub mod transform;

#[cfg(test)]
pub(crate) mod fakes;

// Re-export use cases
pub use listener::{BindFailure, HotkeyListener, ListenerExit};
pub use selection::{BridgeTimings, Capture, ClipboardSnapshot, SelectionBridge};
pub use transform::{TransformEngine, TransformError, TransformOutcome, APP_NAME};
