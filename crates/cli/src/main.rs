//! # CTG Replay CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Sample file loading and validation
//! - Paced replay of both streams against the target
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod pipeline;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::Cli;
use commands::run_replay;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "CTG replay starting");

    // Errors are reported here once; the exit code carries the failure
    match run_replay(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "Replay failed");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging (and the optional metrics endpoint) from CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let (default_log_level, env_filter_override) = if cli.quiet {
        ("warn", false)
    } else {
        let level = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        (level, true)
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: (cli.metrics_port != 0).then_some(cli.metrics_port),
        default_log_level: default_log_level.to_string(),
        env_filter_override,
    })
}
