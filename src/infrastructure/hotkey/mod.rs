//! Global hotkey infrastructure module

mod global;

pub use global::{to_hotkey, GlobalHotkeySource};
