//! Domain error types

use thiserror::Error;

/// Error when parsing a key combination string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyComboParseError {
    #[error("Empty key combination")]
    Empty,

    #[error("Invalid key combination \"{input}\": no key besides modifiers (e.g., ctrl+e)")]
    MissingKey { input: String },

    #[error("Invalid key combination \"{input}\": more than one key ('{first}' and '{second}')")]
    MultipleKeys {
        input: String,
        first: String,
        second: String,
    },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Shortcut '{id}': {message}")]
    InvalidShortcut { id: String, message: String },

    #[error("Shortcut '{id}' is defined more than once")]
    DuplicateId { id: String },

    #[error("Shortcuts '{first}' and '{second}' both use {keys}")]
    DuplicateKeys {
        keys: String,
        first: String,
        second: String,
    },

    #[error("Shortcut '{id}' uses {keys}, which is reserved for quitting")]
    ReservedKeys { id: String, keys: String },

    #[error("No usable shortcuts configured")]
    NoShortcuts,
}

/// Error when an unknown backend name is configured
#[derive(Debug, Clone, Error)]
#[error("Unknown backend: \"{input}\". Valid backends are: openai, ollama")]
pub struct InvalidBackendError {
    pub input: String,
}
