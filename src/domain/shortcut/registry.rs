//! Shortcut registry
//!
//! Built once from configuration and read-only afterwards. Lookups by id and
//! by normalized key combination.

use std::collections::HashMap;

use crate::domain::config::ShortcutConfig;
use crate::domain::error::ConfigError;

use super::definition::ShortcutDefinition;
use super::key_combo::KeyCombination;

/// Result of building a registry leniently from config records
#[derive(Debug)]
pub struct RegistryBuild {
    /// Registry containing every usable shortcut
    pub registry: ShortcutRegistry,
    /// One error per skipped record
    pub problems: Vec<ConfigError>,
}

/// Immutable lookup table of shortcut definitions
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<ShortcutDefinition>,
    by_id: HashMap<String, usize>,
    by_keys: HashMap<KeyCombination, usize>,
}

impl ShortcutRegistry {
    /// Build a registry, failing on the first duplicate id or key combination
    pub fn new(definitions: Vec<ShortcutDefinition>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for definition in definitions {
            registry.insert(definition, None)?;
        }
        Ok(registry)
    }

    /// Build a registry from config records, skipping records that are
    /// invalid, duplicated, or bound to the reserved combination.
    /// The first record wins on a duplicate.
    pub fn from_config(
        records: &[ShortcutConfig],
        reserved: Option<&KeyCombination>,
    ) -> RegistryBuild {
        let mut registry = Self::default();
        let mut problems = Vec::new();

        for record in records {
            let result = ShortcutDefinition::try_from(record)
                .and_then(|definition| registry.insert(definition, reserved));
            if let Err(e) = result {
                problems.push(e);
            }
        }

        RegistryBuild { registry, problems }
    }

    fn insert(
        &mut self,
        definition: ShortcutDefinition,
        reserved: Option<&KeyCombination>,
    ) -> Result<(), ConfigError> {
        if reserved == Some(definition.keys()) {
            return Err(ConfigError::ReservedKeys {
                id: definition.id().to_string(),
                keys: definition.keys().to_string(),
            });
        }

        if self.by_id.contains_key(definition.id()) {
            return Err(ConfigError::DuplicateId {
                id: definition.id().to_string(),
            });
        }

        if let Some(&existing) = self.by_keys.get(definition.keys()) {
            return Err(ConfigError::DuplicateKeys {
                keys: definition.keys().to_string(),
                first: self.shortcuts[existing].id().to_string(),
                second: definition.id().to_string(),
            });
        }

        let index = self.shortcuts.len();
        self.by_id.insert(definition.id().to_string(), index);
        self.by_keys.insert(definition.keys().clone(), index);
        self.shortcuts.push(definition);
        Ok(())
    }

    /// Look up a shortcut by id
    pub fn by_id(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.by_id.get(id).map(|&i| &self.shortcuts[i])
    }

    /// Look up a shortcut by key combination
    pub fn by_keys(&self, keys: &KeyCombination) -> Option<&ShortcutDefinition> {
        self.by_keys.get(keys).map(|&i| &self.shortcuts[i])
    }

    /// Shortcuts in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &ShortcutDefinition> {
        self.shortcuts.iter()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
