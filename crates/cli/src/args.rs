//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map the remove selectors (ids, `--pattern`, `--all`) onto a single selection.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`).

use clap::{Parser, Subcommand, ValueEnum};
use signoz_client::{Policy, SelectionExpression};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sdm")]
#[command(about = "SigNoz dashboard manager - list, add and remove SigNoz dashboards", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  sdm login -e admin@example.com\n  sdm ls\n  sdm rm 4d2e1a5c-0b7f-4f3e-8c1a-9e6d2b7f3a10\n  sdm rm -T 'CPU*' --yes\n  sdm add ./dashboards/*.json --skip-errors\n  sdm add https://github.com/SigNoz/dashboards/blob/main/hostmetrics/hostmetrics.json\n  sdm add --browse\n"
)]
pub struct Cli {
    /// SigNoz API URL (default: http://localhost:3301)
    #[arg(short, long, global = true, env = "SIGNOZ_URL")]
    pub url: Option<String>,

    /// Authentication token (optional if logged in)
    #[arg(short, long, global = true, env = "SIGNOZ_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip all confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Same as --yes
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Continue with the remaining dashboards when one fails
    #[arg(short, long, global = true)]
    pub skip_errors: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SIGNOZ_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Retries for rate-limited (HTTP 429) requests
    #[arg(long, global = true, env = "SIGNOZ_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "SIGNOZ_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Path to the session file (overrides the default location).
    ///
    /// Can also be set via SIGNOZ_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "SIGNOZ_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Suppress progress output (spinners / progress bars).
    ///
    /// Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Emit diagnostic logs as JSON lines on stderr
    #[arg(long, global = true, hide = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn policy(&self) -> Policy {
        Policy {
            skip_errors: self.skip_errors,
            assume_yes: self.yes || self.force,
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the session
    Login {
        /// Email address (optional if SIGNOZ_EMAIL is set)
        #[arg(short, long, env = "SIGNOZ_EMAIL")]
        email: Option<String>,

        /// Password (optional if SIGNOZ_PASSWORD is set; prompted otherwise)
        #[arg(short, long, env = "SIGNOZ_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// List dashboards
    #[command(visible_alias = "list")]
    Ls,

    /// Show the saved configuration
    #[command(visible_alias = "config")]
    Cfg,

    /// Remove dashboards by id, title pattern, or all
    #[command(visible_alias = "remove")]
    Rm {
        /// Dashboard UUIDs
        #[arg(value_name = "ID", conflicts_with_all = ["pattern", "all"])]
        ids: Vec<String>,

        /// Remove dashboards whose title matches a glob (`*` and `?`, case-insensitive)
        #[arg(short = 'T', long, conflicts_with = "all")]
        pattern: Option<String>,

        /// Remove every dashboard
        #[arg(short, long)]
        all: bool,
    },

    /// Add dashboards from JSON files or URLs
    Add {
        /// Local paths or http(s) URLs of dashboard definitions
        #[arg(value_name = "SOURCE", required_unless_present = "browse")]
        sources: Vec<String>,

        /// Pick dashboards from the community repository
        #[arg(short, long, conflicts_with = "sources")]
        browse: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Build the selection for `rm`, or `None` when no selector was given.
pub fn remove_selection(
    ids: Vec<String>,
    pattern: Option<String>,
    all: bool,
) -> Option<SelectionExpression> {
    if all {
        Some(SelectionExpression::All)
    } else if let Some(pattern) = pattern {
        Some(SelectionExpression::TitlePattern(pattern))
    } else if !ids.is_empty() {
        Some(SelectionExpression::ExplicitIds(ids))
    } else {
        None
    }
}
