//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! signal handling, and the application runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{list_shortcuts, run_listener, run_once, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
