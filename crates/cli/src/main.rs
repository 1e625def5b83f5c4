//! sdm - command-line manager for SigNoz dashboards.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run dashboard commands (list, add, remove) via the shared client library.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - REST API calls or batch semantics (see `crates/client`).
//! - Configuration precedence rules (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Diagnostics and progress go to stderr; command results go to stdout.

mod args;
#[macro_use]
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod interactive;
mod progress;
mod session;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::{ConfigCommandContext, load_config};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use signoz_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let needs_real_config = !matches!(cli.command, args::Commands::Completions { .. });

    let config_context = if needs_real_config {
        match load_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("{:#}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Placeholder
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
