//! calstatus CLI entry point.

use std::process::ExitCode;

use calstatus_core::init_tracing;
use clap::Parser;

use calstatus_client::cli::{Cli, Command, ConfigAction};
use calstatus_client::commands;
use calstatus_client::config::ClientConfig;
use calstatus_client::error::{ClientError, ClientResult};
use calstatus_client::status::StatusRunner;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };
    let config = config.with_cli_overrides(&cli);

    // Initialize tracing
    if let Err(e) = init_tracing(config.tracing_config(cli.watch)) {
        eprintln!("warning: {}", e);
    }

    // Handle subcommands
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
        None => {
            let runner = StatusRunner::from_config(&config)?;
            if cli.watch {
                commands::status::watch(&runner, config.refresh.interval(), cli.now, cli.json)
                    .await
            } else {
                commands::status::once(&runner, cli.now, cli.json).await
            }
        }
    }
}
