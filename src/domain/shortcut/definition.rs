//! Shortcut definition entity and backend kind

use std::fmt;
use std::str::FromStr;

use crate::domain::config::ShortcutConfig;
use crate::domain::error::{ConfigError, InvalidBackendError};

use super::key_combo::KeyCombination;

/// Extra top-level request fields for a backend (e.g. `temperature`)
pub type BackendOptions = serde_json::Map<String, serde_json::Value>;

/// Model used for hosted shortcuts that do not name one
pub const DEFAULT_HOSTED_MODEL: &str = "gpt-4o";

/// Backend kinds a shortcut can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Hosted chat-completions API (OpenAI-compatible)
    HostedApi,
    /// Local generate API (Ollama)
    LocalApi,
}

impl BackendKind {
    /// Get the config file name of this backend
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HostedApi => "openai",
            Self::LocalApi => "ollama",
        }
    }

    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HostedApi => "OpenAI",
            Self::LocalApi => "Ollama",
        }
    }

    /// Model to fall back to when a shortcut omits one
    pub const fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::HostedApi => Some(DEFAULT_HOSTED_MODEL),
            Self::LocalApi => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = InvalidBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "hosted" => Ok(Self::HostedApi),
            "ollama" | "local" => Ok(Self::LocalApi),
            _ => Err(InvalidBackendError {
                input: s.to_string(),
            }),
        }
    }
}

/// A configured shortcut. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutDefinition {
    id: String,
    keys: KeyCombination,
    backend: BackendKind,
    model: String,
    prompt: String,
    options: BackendOptions,
}

impl ShortcutDefinition {
    /// Create a shortcut definition
    pub fn new(
        id: impl Into<String>,
        keys: KeyCombination,
        backend: BackendKind,
        model: impl Into<String>,
        prompt: impl Into<String>,
        options: BackendOptions,
    ) -> Self {
        Self {
            id: id.into(),
            keys,
            backend,
            model: model.into(),
            prompt: prompt.into(),
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn keys(&self) -> &KeyCombination {
        &self.keys
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Extra request fields for this shortcut's backend
    pub fn options(&self) -> &BackendOptions {
        &self.options
    }
}

impl TryFrom<&ShortcutConfig> for ShortcutDefinition {
    type Error = ConfigError;

    fn try_from(record: &ShortcutConfig) -> Result<Self, Self::Error> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(ConfigError::InvalidShortcut {
                id: format!("<keys {}>", record.keys),
                message: "missing id".to_string(),
            });
        }

        let invalid = |message: String| ConfigError::InvalidShortcut {
            id: id.to_string(),
            message,
        };

        let keys: KeyCombination = record.keys.parse().map_err(|e| invalid(format!("{}", e)))?;
        let backend: BackendKind = record
            .backend
            .parse()
            .map_err(|e| invalid(format!("{}", e)))?;

        let model = record
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| backend.default_model())
            .ok_or_else(|| invalid(format!("{} shortcuts require a model", backend.label())))?;

        let options = match backend {
            BackendKind::HostedApi => record.openai_options.clone(),
            BackendKind::LocalApi => record.ollama_options.clone(),
        }
        .unwrap_or_default();

        Ok(Self::new(
            id,
            keys,
            backend,
            model,
            record.prompt.as_str(),
            options,
        ))
    }
}
