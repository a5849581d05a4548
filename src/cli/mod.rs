//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP server
//! - seed: One-shot demo catalog insertion
//! - diagnose: One-shot diagnostics report

mod args;
mod errors;

use std::io::{self, Write};

use serde::Serialize;
use tracing::info;

use crate::http_server::{AppConfig, AppState, HttpServer, StoreBackend};
use crate::observability;

pub use args::{Cli, Command, StoreArgs};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init_tracing(cli.log_format);
    run_command(cli.command).await
}

/// Run a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    let mut config = AppConfig::from_env()?;

    match command {
        Command::Serve { host, port, store } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            apply_store_args(&mut config, &store);
            serve(config).await
        }
        Command::Seed { store } => {
            apply_store_args(&mut config, &store);
            seed(&config).await
        }
        Command::Diagnose { store } => {
            apply_store_args(&mut config, &store);
            diagnose(&config).await
        }
    }
}

fn apply_store_args(config: &mut AppConfig, store: &StoreArgs) {
    if store.memory {
        config.backend = StoreBackend::Memory;
    }
}

/// Run the HTTP server until shutdown
pub async fn serve(config: AppConfig) -> CliResult<()> {
    info!(
        host = %config.host,
        port = config.port,
        backend = ?config.backend,
        database_configured = config.database_settings().is_some(),
        "Starting MU Foods API"
    );

    let server = HttpServer::from_config(config).await;
    server.start().await?;
    Ok(())
}

#[derive(Serialize)]
struct SeedReport {
    ok: bool,
    message: &'static str,
    count: u64,
}

/// Seed the configured store and print the outcome as JSON
pub async fn seed(config: &AppConfig) -> CliResult<()> {
    let state = AppState::from_config(config).await;
    let outcome = state.catalog.seed_beverages().await?;

    write_json(&SeedReport {
        ok: true,
        message: outcome.message(),
        count: outcome.count(),
    })
}

/// Print the diagnostics report as JSON
pub async fn diagnose(config: &AppConfig) -> CliResult<()> {
    let state = AppState::from_config(config).await;
    let report = state.catalog.diagnostics(state.env).await;
    write_json(&report)
}

fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
