//! Application runners: hotkey listener, one-shot run, shortcut listing

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::ports::{
    Clipboard, ConfigStore, HotkeyError, Keystroke, KeystrokeError, NotificationIcon, Notifier,
};
use crate::application::{
    HotkeyListener, SelectionBridge, TransformEngine, TransformError, TransformOutcome,
};
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, KeyComboParseError};
use crate::domain::shortcut::{BackendKind, KeyCombination, RegistryBuild, ShortcutRegistry};
use crate::infrastructure::clipboard::ParseClipboardToolError;
use crate::infrastructure::keystroke::ParseKeystrokeToolError;
use crate::infrastructure::{
    create_clipboard, create_keystroke, create_notifier, BackendRouter, ClipboardTool,
    GlobalHotkeySource, HostedApiBackend, KeystrokeToolPreference, LocalApiBackend,
    XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Engine wired to the desktop adapters
pub type DesktopEngine = TransformEngine<
    Box<dyn Clipboard>,
    Box<dyn Keystroke>,
    BackendRouter<HostedApiBackend, LocalApiBackend>,
    Box<dyn Notifier>,
>;

/// Errors that stop the program before or while starting up
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ClipboardTool(#[from] ParseClipboardToolError),

    #[error(transparent)]
    KeystrokeTool(#[from] ParseKeystrokeToolError),

    #[error(transparent)]
    Keystroke(#[from] KeystrokeError),

    #[error("Hotkeys unavailable: {0}")]
    Hotkey(#[from] HotkeyError),

    #[error("Failed to install signal handlers: {0}")]
    Signals(#[from] io::Error),

    #[error("None of the configured shortcuts could be bound")]
    NothingBound,
}

/// Merged configuration plus the registry built from it
pub struct LoadedConfig {
    pub config: AppConfig,
    pub quit_keys: KeyCombination,
    pub registry: ShortcutRegistry,
    /// Shortcut records that were skipped
    pub problems: Vec<ConfigError>,
}

/// Config store at `path`, or at the default location
pub fn config_store(path: Option<PathBuf>) -> XdgConfigStore {
    match path {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    }
}

/// Settings taken from `OPENAI_API_KEY` and `OLLAMA_BASE_URL`
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());

    let mut config = AppConfig::empty();
    config.settings.openai_api_key = var("OPENAI_API_KEY");
    config.settings.ollama_base_url = var("OLLAMA_BASE_URL");
    config
}

/// Merge defaults < file < env < cli.
///
/// Only the default settings take part; shortcuts come from the file alone,
/// so a missing config file yields no shortcuts.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;

    let defaults = AppConfig {
        settings: AppConfig::defaults().settings,
        shortcuts: Vec::new(),
    };

    Ok(defaults
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config))
}

/// Load the merged config and build the shortcut registry from it
pub async fn load_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<LoadedConfig, ConfigError> {
    let config = load_merged_config(store, cli_config).await?;

    let quit_keys: KeyCombination = config
        .quit_keys_or_default()
        .parse()
        .map_err(|e: KeyComboParseError| ConfigError::ValidationError {
            key: "quit_keys".to_string(),
            message: e.to_string(),
        })?;

    let RegistryBuild { registry, problems } =
        ShortcutRegistry::from_config(&config.shortcuts, Some(&quit_keys));

    Ok(LoadedConfig {
        config,
        quit_keys,
        registry,
        problems,
    })
}

/// Log and print every skipped shortcut record
pub fn report_problems(problems: &[ConfigError], presenter: &Presenter) {
    for problem in problems {
        warn!(error = %problem, "skipping shortcut");
        presenter.warn(&format!("Skipped: {}", problem));
    }
}

fn warn_missing_api_key(loaded: &LoadedConfig, presenter: &Presenter) {
    let uses_hosted = loaded
        .registry
        .iter()
        .any(|s| matches!(s.backend(), BackendKind::HostedApi));

    if uses_hosted && loaded.config.backend_settings().hosted_api_key().is_none() {
        warn!("no OpenAI API key configured");
        presenter.warn(
            "OpenAI API key not set. Set OPENAI_API_KEY or settings.openai_api_key; \
             OpenAI shortcuts fail until then.",
        );
    }
}

/// Build the engine with the adapters named in the config
pub async fn build_engine(
    config: &AppConfig,
    registry: Arc<ShortcutRegistry>,
    notify: bool,
) -> Result<DesktopEngine, StartupError> {
    let clipboard_tool: ClipboardTool = config.clipboard_tool_or_default().parse()?;
    let keystroke_tool: KeystrokeToolPreference = config.keystroke_tool_or_default().parse()?;

    let (keystroke, keystroke_name) = create_keystroke(keystroke_tool).await?;
    info!(clipboard = %clipboard_tool, keystroke = keystroke_name, "desktop adapters ready");

    let bridge = SelectionBridge::new(create_clipboard(clipboard_tool), keystroke);
    let backend = BackendRouter::from_settings(&config.backend_settings());

    Ok(TransformEngine::new(
        bridge,
        backend,
        create_notifier(notify),
        registry,
    ))
}

/// Listen for hotkeys until the quit combination or a signal
pub async fn run_listener(
    config_path: Option<PathBuf>,
    cli_config: AppConfig,
    notify: bool,
    presenter: &Presenter,
) -> ExitCode {
    let store = config_store(config_path);

    match listen(&store, cli_config, notify, presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            error!(error = %e, "listener failed to start");
            presenter.error(&e.to_string());
            if matches!(e, StartupError::Config(ConfigError::NoShortcuts)) {
                presenter.info(&format!(
                    "Add shortcuts to {} or run 'bettrwrite config init'",
                    store.path().display()
                ));
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn listen<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    notify: bool,
    presenter: &Presenter,
) -> Result<(), StartupError> {
    let loaded = load_config(store, cli_config).await?;
    report_problems(&loaded.problems, presenter);
    if loaded.registry.is_empty() {
        return Err(ConfigError::NoShortcuts.into());
    }
    warn_missing_api_key(&loaded, presenter);

    let engine = build_engine(&loaded.config, Arc::new(loaded.registry), notify).await?;
    for problem in &loaded.problems {
        engine
            .notify("Configuration Error", &problem.to_string(), NotificationIcon::Warning)
            .await;
    }

    let mut listener = HotkeyListener::new(GlobalHotkeySource::new()?);
    listener.bind_quit(&loaded.quit_keys)?;
    for failure in listener.bind_shortcuts(engine.registry()) {
        let message = format!(
            "'{}' could not be bound: {}",
            failure.shortcut_id, failure.error
        );
        presenter.warn(&message);
        engine
            .notify("Hotkey Error", &message, NotificationIcon::Warning)
            .await;
    }
    if listener.bound_shortcuts() == 0 {
        return Err(StartupError::NothingBound);
    }

    let shutdown = ShutdownSignal::install()?;

    let quit = loaded.quit_keys.to_string();
    presenter.shortcut_table(engine.registry().iter());
    presenter.info(&format!(
        "Listening for {} shortcut(s). Press {} to quit.",
        listener.bound_shortcuts(),
        quit
    ));
    info!(shortcuts = listener.bound_shortcuts(), quit = %quit, "listener started");
    engine
        .notify("Started", &format!("Press {} to quit", quit), NotificationIcon::Info)
        .await;

    let engine = &engine;
    let exit = listener
        .run(
            move |shortcut_id| async move {
                let result = engine.run(&shortcut_id).await;
                report_run(&shortcut_id, &result, presenter);
            },
            shutdown.wait(),
        )
        .await;

    info!(reason = ?exit, "listener stopped");
    engine
        .notify("Stopped", "No longer listening for shortcuts", NotificationIcon::Info)
        .await;
    presenter.info("Stopped");
    Ok(())
}

fn report_run(
    shortcut_id: &str,
    result: &Result<TransformOutcome, TransformError>,
    presenter: &Presenter,
) {
    match result {
        Ok(TransformOutcome::Replaced { chars }) => presenter.success(&format!(
            "{}: replaced selection ({} characters)",
            shortcut_id, chars
        )),
        Ok(TransformOutcome::NothingSelected) => {
            presenter.info(&format!("{}: no text selected", shortcut_id))
        }
        Err(e) => presenter.error(&format!("{}: {}", shortcut_id, e)),
    }
}

/// Run one shortcut against the current selection
pub async fn run_once(
    shortcut_id: &str,
    config_path: Option<PathBuf>,
    cli_config: AppConfig,
    notify: bool,
    presenter: &mut Presenter,
) -> ExitCode {
    let store = config_store(config_path);
    let loaded = match load_config(&store, cli_config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    report_problems(&loaded.problems, presenter);

    if loaded.registry.by_id(shortcut_id).is_none() {
        error!(shortcut = shortcut_id, "shortcut not configured");
        presenter.error(&TransformError::UnknownShortcut(shortcut_id.to_string()).to_string());
        let known: Vec<_> = loaded.registry.iter().map(|s| s.id()).collect();
        if !known.is_empty() {
            presenter.info(&format!("Configured shortcuts: {}", known.join(", ")));
        }
        return ExitCode::from(EXIT_ERROR);
    }
    warn_missing_api_key(&loaded, presenter);

    let engine = match build_engine(&loaded.config, Arc::new(loaded.registry), notify).await {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "failed to set up adapters");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner(&format!("Running '{}'...", shortcut_id));
    match engine.run(shortcut_id).await {
        Ok(TransformOutcome::Replaced { chars }) => {
            presenter.spinner_success(&format!("Replaced selection ({} characters)", chars));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(TransformOutcome::NothingSelected) => {
            presenter.stop_spinner();
            presenter.warn("No text selected");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the usable shortcuts and the skipped records
pub async fn list_shortcuts(
    config_path: Option<PathBuf>,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> ExitCode {
    let store = config_store(config_path);
    let loaded = match load_config(&store, cli_config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    report_problems(&loaded.problems, presenter);
    if loaded.registry.is_empty() {
        presenter.warn(&format!(
            "No usable shortcuts in {}",
            store.path().display()
        ));
    } else {
        presenter.shortcut_table(loaded.registry.iter());
    }
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> XdgConfigStore {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        XdgConfigStore::with_path(path)
    }

    #[tokio::test]
    async fn missing_file_gives_default_settings_and_no_shortcuts() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("absent.toml"));

        let config = load_merged_config(&store, AppConfig::empty()).await.unwrap();

        assert!(config.shortcuts.is_empty());
        assert_eq!(config.quit_keys_or_default(), "ctrl+q");
        assert_eq!(config.keystroke_tool_or_default(), "enigo");
    }

    #[tokio::test]
    async fn cli_overrides_file_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_config(&dir, "[settings]\nkeystroke_tool = \"xdotool\"\n");

        let mut cli = AppConfig::empty();
        cli.settings.keystroke_tool = Some("wtype".to_string());
        let config = load_merged_config(&store, cli).await.unwrap();

        assert_eq!(config.keystroke_tool_or_default(), "wtype");
    }

    #[tokio::test]
    async fn registry_skips_records_bound_to_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_config(
            &dir,
            r#"
[settings]
quit_keys = "ctrl+alt+q"

[[shortcuts]]
id = "fix"
keys = "ctrl+e"
backend = "ollama"
model = "llama3"
prompt = "Fix."

[[shortcuts]]
id = "clash"
keys = "alt+ctrl+q"
prompt = "Anything."
"#,
        );

        let loaded = load_config(&store, AppConfig::empty()).await.unwrap();

        assert_eq!(loaded.registry.len(), 1);
        assert!(loaded.registry.by_id("fix").is_some());
        assert_eq!(loaded.problems.len(), 1);
        assert!(matches!(loaded.problems[0], ConfigError::ReservedKeys { .. }));
    }

    #[tokio::test]
    async fn invalid_quit_keys_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_config(&dir, "[settings]\nquit_keys = \"ctrl+\"\n");

        let err = load_config(&store, AppConfig::empty()).await.err().unwrap();

        assert!(matches!(err, ConfigError::ValidationError { ref key, .. } if key == "quit_keys"));
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_config(&dir, "[[shortcuts]\n");

        let err = load_merged_config(&store, AppConfig::empty()).await.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
