//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::app::load_config;
use super::args::ConfigAction;
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
        ConfigAction::Show => handle_show(store, cli_config, presenter).await,
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    presenter.info("Set settings.openai_api_key (or OPENAI_API_KEY) before using OpenAI shortcuts");
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

async fn handle_show<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    if !store.exists() {
        presenter.warn(&format!(
            "No config file at {}, showing defaults",
            store.path().display()
        ));
    }

    let loaded = load_config(store, cli_config).await?;
    let config = &loaded.config;
    let backends = config.backend_settings();

    presenter.key_value("config_file", &store.path().to_string_lossy());
    presenter.key_value(
        "openai_api_key",
        &backends
            .hosted_api_key()
            .map(mask_api_key)
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value("openai_base_url", backends.hosted_base_url());
    presenter.key_value("ollama_base_url", backends.local_base_url());
    presenter.key_value("quit_keys", &loaded.quit_keys.to_string());
    presenter.key_value("keystroke_tool", config.keystroke_tool_or_default());
    presenter.key_value("clipboard_tool", config.clipboard_tool_or_default());

    presenter.output("");
    presenter.shortcut_table(loaded.registry.iter());
    for problem in &loaded.problems {
        presenter.warn(&format!("Skipped: {}", problem));
    }

    Ok(())
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
