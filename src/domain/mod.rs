//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod shortcut;
pub mod transform;

// Re-export common types
pub use config::{AppConfig, BackendSettings};
pub use error::*;
pub use shortcut::{BackendKind, KeyCombination, ShortcutDefinition, ShortcutRegistry};
pub use transform::{TransformRequest, TransformSession, TransformState};
