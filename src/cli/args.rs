//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::config::{AppConfig, SettingsConfig};

/// bettrWrite - rewrite the selected text in place with an LLM
#[derive(Parser, Debug)]
#[command(name = "bettrwrite")]
#[command(version)]
#[command(about = "Rewrite the selected text in place with an LLM, triggered by a global hotkey")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Do not append logs to the log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    /// Keystroke tool to use (enigo, auto, xdotool, wtype, ydotool)
    #[arg(long, global = true, value_name = "TOOL")]
    pub keystroke_tool: Option<String>,

    /// Clipboard tool to use (arboard, wl-clipboard)
    #[arg(long, global = true, value_name = "TOOL")]
    pub clipboard_tool: Option<String>,

    /// Disable desktop notifications
    #[arg(long, global = true)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Listen for shortcut hotkeys (default)
    Listen,
    /// Run one shortcut against the current selection and exit
    Run {
        /// Shortcut id from the config file
        shortcut_id: String,
    },
    /// List configured shortcuts
    Shortcuts,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Show config file path
    Path,
    /// Show effective settings and shortcuts
    Show,
}

impl Cli {
    /// Settings given on the command line, as the top layer of the config merge
    pub fn config_overrides(&self) -> AppConfig {
        AppConfig {
            settings: SettingsConfig {
                keystroke_tool: self.keystroke_tool.clone(),
                clipboard_tool: self.clipboard_tool.clone(),
                ..Default::default()
            },
            shortcuts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["bettrwrite"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(!cli.no_log_file);
        assert!(!cli.no_notify);
        assert!(cli.keystroke_tool.is_none());
    }

    #[test]
    fn cli_parses_run() {
        let cli = Cli::parse_from(["bettrwrite", "run", "grammar_correct"]);
        assert_eq!(
            cli.command,
            Some(Commands::Run {
                shortcut_id: "grammar_correct".to_string()
            })
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "bettrwrite",
            "listen",
            "--config",
            "/tmp/b.toml",
            "--no-notify",
            "-v",
        ]);
        assert_eq!(cli.command, Some(Commands::Listen));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/b.toml")));
        assert!(cli.no_notify);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_config_show() {
        let cli = Cli::parse_from(["bettrwrite", "config", "show"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        );
    }

    #[test]
    fn run_requires_shortcut_id() {
        assert!(Cli::try_parse_from(["bettrwrite", "run"]).is_err());
    }

    #[test]
    fn tool_flags_become_overrides() {
        let cli = Cli::parse_from([
            "bettrwrite",
            "--keystroke-tool",
            "xdotool",
            "--clipboard-tool",
            "wl-clipboard",
        ]);
        let overrides = cli.config_overrides();
        assert_eq!(overrides.settings.keystroke_tool.as_deref(), Some("xdotool"));
        assert_eq!(overrides.settings.clipboard_tool.as_deref(), Some("wl-clipboard"));
        assert!(overrides.settings.openai_api_key.is_none());
        assert!(overrides.shortcuts.is_empty());
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
