//! Application configuration value objects

use serde::{Deserialize, Serialize};

use crate::domain::shortcut::BackendOptions;

/// Placeholder written by the installer when no API key was provided
pub const API_KEY_PLACEHOLDER: &str = "YOUR_OPENAI_API_KEY_OR_NULL";

/// Default hosted API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default local API base URL
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default combination that stops the listener
pub const DEFAULT_QUIT_KEYS: &str = "ctrl+q";

/// Default keystroke tool
pub const DEFAULT_KEYSTROKE_TOOL: &str = "enigo";

/// Default clipboard tool
pub const DEFAULT_CLIPBOARD_TOOL: &str = "arboard";

/// Default grammar prompt used by `config init`
pub const DEFAULT_PROMPT: &str = "You are a helpful assistant that corrects grammar and spelling errors \
in the provided text without changing its meaning or tone. \
Only fix errors - don't rewrite the text. Output ONLY the corrected text.";

/// Process-wide settings section.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub ollama_base_url: Option<String>,
    pub quit_keys: Option<String>,
    pub keystroke_tool: Option<String>,
    pub clipboard_tool: Option<String>,
}

/// One `[[shortcuts]]` record as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub keys: String,
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_options: Option<BackendOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama_options: Option<BackendOptions>,
}

fn default_backend() -> String {
    "openai".to_string()
}

/// Application configuration: settings plus the shortcut list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub shortcuts: Vec<ShortcutConfig>,
}

/// Resolved backend credentials and endpoints.
/// Built once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    hosted_api_key: Option<String>,
    hosted_base_url: String,
    local_base_url: String,
}

impl BackendSettings {
    /// Create settings from explicit values
    pub fn new(
        hosted_api_key: Option<String>,
        hosted_base_url: impl Into<String>,
        local_base_url: impl Into<String>,
    ) -> Self {
        Self {
            hosted_api_key,
            hosted_base_url: hosted_base_url.into(),
            local_base_url: local_base_url.into(),
        }
    }

    /// Hosted API key, or None when absent, blank or still the placeholder
    pub fn hosted_api_key(&self) -> Option<&str> {
        self.hosted_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
    }

    /// Hosted API base URL without a trailing slash
    pub fn hosted_base_url(&self) -> &str {
        self.hosted_base_url.trim_end_matches('/')
    }

    /// Local API base URL without a trailing slash
    pub fn local_base_url(&self) -> &str {
        self.local_base_url.trim_end_matches('/')
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self::new(None, DEFAULT_OPENAI_BASE_URL, DEFAULT_OLLAMA_BASE_URL)
    }
}

impl AppConfig {
    /// Create config with default settings and the installer's default shortcut
    pub fn defaults() -> Self {
        let mut options = BackendOptions::new();
        options.insert("temperature".to_string(), serde_json::json!(0.3));

        Self {
            settings: SettingsConfig {
                openai_api_key: Some(API_KEY_PLACEHOLDER.to_string()),
                openai_base_url: Some(DEFAULT_OPENAI_BASE_URL.to_string()),
                ollama_base_url: Some(DEFAULT_OLLAMA_BASE_URL.to_string()),
                quit_keys: Some(DEFAULT_QUIT_KEYS.to_string()),
                keystroke_tool: Some(DEFAULT_KEYSTROKE_TOOL.to_string()),
                clipboard_tool: Some(DEFAULT_CLIPBOARD_TOOL.to_string()),
            },
            shortcuts: vec![ShortcutConfig {
                id: "grammar_correct".to_string(),
                keys: "ctrl+e".to_string(),
                backend: "openai".to_string(),
                model: Some("gpt-4o".to_string()),
                prompt: DEFAULT_PROMPT.to_string(),
                openai_options: Some(options.clone()),
                ollama_options: Some(options),
            }],
        }
    }

    /// Create an empty config (no settings, no shortcuts)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Settings merge field by field; a non-empty shortcut list replaces ours.
    pub fn merge(self, other: Self) -> Self {
        let settings = SettingsConfig {
            openai_api_key: other.settings.openai_api_key.or(self.settings.openai_api_key),
            openai_base_url: other
                .settings
                .openai_base_url
                .or(self.settings.openai_base_url),
            ollama_base_url: other
                .settings
                .ollama_base_url
                .or(self.settings.ollama_base_url),
            quit_keys: other.settings.quit_keys.or(self.settings.quit_keys),
            keystroke_tool: other.settings.keystroke_tool.or(self.settings.keystroke_tool),
            clipboard_tool: other.settings.clipboard_tool.or(self.settings.clipboard_tool),
        };

        let shortcuts = if other.shortcuts.is_empty() {
            self.shortcuts
        } else {
            other.shortcuts
        };

        Self {
            settings,
            shortcuts,
        }
    }

    /// Resolve backend credentials and endpoints
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings::new(
            self.settings.openai_api_key.clone(),
            self.settings
                .openai_base_url
                .as_deref()
                .unwrap_or(DEFAULT_OPENAI_BASE_URL),
            self.settings
                .ollama_base_url
                .as_deref()
                .unwrap_or(DEFAULT_OLLAMA_BASE_URL),
        )
    }

    /// Get the quit combination, or "ctrl+q" if not set
    pub fn quit_keys_or_default(&self) -> &str {
        self.settings
            .quit_keys
            .as_deref()
            .unwrap_or(DEFAULT_QUIT_KEYS)
    }

    /// Get keystroke tool preference, or "enigo" if not set
    pub fn keystroke_tool_or_default(&self) -> &str {
        self.settings
            .keystroke_tool
            .as_deref()
            .unwrap_or(DEFAULT_KEYSTROKE_TOOL)
    }

    /// Get clipboard tool preference, or "arboard" if not set
    pub fn clipboard_tool_or_default(&self) -> &str {
        self.settings
            .clipboard_tool
            .as_deref()
            .unwrap_or(DEFAULT_CLIPBOARD_TOOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.quit_keys_or_default(), "ctrl+q");
        assert_eq!(config.keystroke_tool_or_default(), "enigo");
        assert_eq!(config.clipboard_tool_or_default(), "arboard");
        assert_eq!(config.shortcuts.len(), 1);

        let shortcut = &config.shortcuts[0];
        assert_eq!(shortcut.id, "grammar_correct");
        assert_eq!(shortcut.keys, "ctrl+e");
        assert_eq!(shortcut.backend, "openai");
        assert!(shortcut.prompt.contains("corrects grammar"));
    }

    #[test]
    fn defaults_api_key_counts_as_missing() {
        let settings = AppConfig::defaults().backend_settings();
        assert!(settings.hosted_api_key().is_none());
    }

    #[test]
    fn empty_has_no_shortcuts() {
        let config = AppConfig::empty();
        assert!(config.shortcuts.is_empty());
        assert!(config.settings.openai_api_key.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            settings: SettingsConfig {
                openai_api_key: Some("base_key".to_string()),
                quit_keys: Some("ctrl+q".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let other = AppConfig {
            settings: SettingsConfig {
                openai_api_key: Some("other_key".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.settings.openai_api_key, Some("other_key".to_string()));
        assert_eq!(merged.settings.quit_keys, Some("ctrl+q".to_string()));
    }

    #[test]
    fn merge_keeps_shortcuts_when_other_has_none() {
        let merged = AppConfig::defaults().merge(AppConfig::empty());
        assert_eq!(merged.shortcuts.len(), 1);
    }

    #[test]
    fn merge_replaces_shortcut_list() {
        let other = AppConfig {
            shortcuts: vec![
                ShortcutConfig {
                    id: "a".to_string(),
                    ..Default::default()
                },
                ShortcutConfig {
                    id: "b".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let merged = AppConfig::defaults().merge(other);
        let ids: Vec<_> = merged.shortcuts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn backend_settings_falls_back_to_defaults() {
        let settings = AppConfig::empty().backend_settings();
        assert_eq!(settings.hosted_base_url(), DEFAULT_OPENAI_BASE_URL);
        assert_eq!(settings.local_base_url(), DEFAULT_OLLAMA_BASE_URL);
        assert!(settings.hosted_api_key().is_none());
    }

    #[test]
    fn backend_settings_trims_trailing_slash() {
        let settings = BackendSettings::new(None, "http://a/", "http://b:11434/");
        assert_eq!(settings.hosted_base_url(), "http://a");
        assert_eq!(settings.local_base_url(), "http://b:11434");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = BackendSettings::new(Some("  ".to_string()), "x", "y");
        assert!(settings.hosted_api_key().is_none());

        let settings = BackendSettings::new(Some("sk-real".to_string()), "x", "y");
        assert_eq!(settings.hosted_api_key(), Some("sk-real"));
    }

    #[test]
    fn shortcut_backend_defaults_to_openai() {
        let parsed: ShortcutConfig = toml::from_str("id = \"x\"\nkeys = \"ctrl+x\"").unwrap();
        assert_eq!(parsed.backend, "openai");
        assert!(parsed.model.is_none());
    }
}
