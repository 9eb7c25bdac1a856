//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::shortcut::ShortcutDefinition;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config show)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one line per shortcut to stdout
    pub fn shortcut_table<'a>(&self, shortcuts: impl IntoIterator<Item = &'a ShortcutDefinition>) {
        let rows: Vec<_> = shortcuts.into_iter().collect();
        let id_width = rows.iter().map(|s| s.id().len()).max().unwrap_or(0);
        let keys: Vec<String> = rows.iter().map(|s| s.keys().to_string()).collect();
        let keys_width = keys.iter().map(String::len).max().unwrap_or(0);

        for (shortcut, keys) in rows.iter().zip(&keys) {
            println!(
                "{}",
                format_shortcut_row(shortcut, keys, id_width, keys_width)
            );
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_shortcut_row(
    shortcut: &ShortcutDefinition,
    keys: &str,
    id_width: usize,
    keys_width: usize,
) -> String {
    format!(
        "{:<id_width$}  {:<keys_width$}  {} ({})",
        shortcut.id(),
        keys,
        shortcut.backend(),
        shortcut.model(),
    )
}
