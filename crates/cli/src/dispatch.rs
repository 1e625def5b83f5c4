//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Hand each handler the config, output format and cancellation token.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).
//!
//! Invariants:
//! - All async commands receive the cancellation token.

use anyhow::Result;

use crate::args::{Cli, Commands, remove_selection};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::config_context::ConfigCommandContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let policy = cli.policy();
    let format = cli.output;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Login { email, password } => {
            let config = config.into_real_config()?;
            commands::login::run(config, email, password, quiet, cancel_token).await?;
        }
        Commands::Ls => {
            let config = config.into_real_config()?;
            commands::list::run(config, format, quiet, cancel_token).await?;
        }
        Commands::Cfg => {
            let config = config.into_real_config()?;
            commands::config::run(&config, format)?;
        }
        Commands::Rm { ids, pattern, all } => {
            let config = config.into_real_config()?;
            let selection = remove_selection(ids, pattern, all);
            commands::remove::run(config, selection, policy, format, quiet, cancel_token).await?;
        }
        Commands::Add { sources, browse } => {
            let config = config.into_real_config()?;
            commands::add::run(config, sources, browse, policy, format, quiet, cancel_token)
                .await?;
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell)?;
        }
    }

    Ok(())
}
