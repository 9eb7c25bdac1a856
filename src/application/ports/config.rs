//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// # Returns
    /// The parsed config, or an empty one (no shortcuts) if the file is missing
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Write configuration to storage, creating parent directories.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the default configuration (settings plus one grammar shortcut).
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
