//! bettrWrite CLI entry point

use std::process::ExitCode;

use clap::Parser;

use bettrwrite::cli::{
    app::config_store,
    handle_config_command, list_shortcuts, logging, run_listener, run_once, Cli, Commands,
    Presenter, EXIT_ERROR,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    let log_file = if cli.no_log_file {
        None
    } else {
        logging::default_log_path()
    };
    for e in logging::init_with_fallback(cli.verbose, log_file.as_deref()) {
        presenter.warn(&e.to_string());
    }

    let cli_config = cli.config_overrides();
    let notify = !cli.no_notify;

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = config_store(cli.config);
            if let Err(e) = handle_config_command(action, &store, cli_config, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Shortcuts) => list_shortcuts(cli.config, cli_config, &presenter).await,
        Some(Commands::Run { shortcut_id }) => {
            run_once(&shortcut_id, cli.config, cli_config, notify, &mut presenter).await
        }
        Some(Commands::Listen) | None => {
            run_listener(cli.config, cli_config, notify, &presenter).await
        }
    }
}
