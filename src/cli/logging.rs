//! Tracing setup
//!
//! Everything goes to the log file. Log lines reach the terminal only with
//! `--verbose` or `RUST_LOG`; otherwise the presenter is the only output.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info";
const VERBOSE_FILTER: &str = "bettrwrite=debug,info";

/// Logging setup failure
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install logger: {0}")]
    Init(String),
}

/// `<data dir>/bettrwrite/bettrwrite.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("bettrwrite").join("bettrwrite.log"))
}

/// Install the global subscriber, appending to `log_file` when given
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let console_level = if verbose || std::env::var_os("RUST_LOG").is_some() {
        LevelFilter::TRACE
    } else {
        LevelFilter::OFF
    };
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(console_level);

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(Mutex::new(open_log_file(path)?))
                .with_ansi(false),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    if let Some(path) = log_file {
        tracing::debug!(path = %path.display(), "logging to file");
    }
    Ok(())
}

/// Install logging, falling back to terminal-only logging when the file
/// setup fails. Returns every error hit along the way.
pub fn init_with_fallback(verbose: bool, log_file: Option<&Path>) -> Vec<LoggingError> {
    let mut errors = Vec::new();
    if let Err(e) = init(verbose, log_file) {
        errors.push(e);
        if log_file.is_some() {
            if let Err(e) = init(verbose, None) {
                errors.push(e);
            }
        }
    }
    errors
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let wrap = |source| LoggingError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(wrap)
}
