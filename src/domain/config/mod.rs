//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, BackendSettings, SettingsConfig, ShortcutConfig, API_KEY_PLACEHOLDER,
    DEFAULT_CLIPBOARD_TOOL, DEFAULT_KEYSTROKE_TOOL, DEFAULT_OLLAMA_BASE_URL,
    DEFAULT_OPENAI_BASE_URL, DEFAULT_PROMPT, DEFAULT_QUIT_KEYS,
};
