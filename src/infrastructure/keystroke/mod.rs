//! Keystroke infrastructure module
//!
//! Simulates the copy and paste chords with enigo (default)
//! or with a native tool on Linux.

mod command;
mod enigo;
mod factory;

pub use command::{CommandKeystroke, CommandTool};
pub use enigo::EnigoKeystroke;
pub use factory::{create_keystroke, KeystrokeToolPreference, ParseKeystrokeToolError};
