//! Shortcut domain module

mod definition;
mod key_combo;
mod registry;

pub use definition::{BackendKind, BackendOptions, ShortcutDefinition, DEFAULT_HOSTED_MODEL};
pub use key_combo::{KeyCombination, Modifier};
pub use registry::{RegistryBuild, ShortcutRegistry};
