//! # Commit Message Checker CLI
//!
//! Command-line interface for checking commit and pull request messages
//! against a regular expression.
//!
//! The binary is meant to run as a CI step. Inputs are read from command line
//! arguments or from the `INPUT_*` environment variables set by GitHub
//! Actions, and the triggering event is read from `GITHUB_EVENT_NAME` and
//! `GITHUB_EVENT_PATH`. Defaults may be kept in a `.commit-message-checker.toml`
//! file.
//!
//! # Exit codes
//!
//! - `0` - all messages passed, or there was nothing to check
//! - `1` - a message failed the check
//! - `2` - invalid configuration
//! - `3` - an access token is missing or was rejected
//! - `4` - GitHub could not be queried
//! - `5` - invalid arguments or event payload
//!
//! # Examples
//!
//! ```bash
//! commit-message-checker \
//!     --pattern '^(feat|fix|docs|chore)(\(.+\))?: ' \
//!     --error 'Commit messages must follow the Conventional Commits format.' \
//!     --event-name push \
//!     --event-path ./event.json
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::process::{ExitCode, Termination};

use clap::Parser;
use tracing::{error, info};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::check::{workflow_error_command, CheckArgs};
use errors::CliError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_FILTER_ENV: &str = "COMMIT_MESSAGE_CHECKER_LOG";

/// Command-line interface structure for the commit message checker.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// The inputs of the check
    #[command(flatten)]
    check: CheckArgs,
}

/// Installs the tracing subscriber.
///
/// The filter is read from `COMMIT_MESSAGE_CHECKER_LOG`. Without it the
/// checker logs at `info`, or at `debug` when `verbose` is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Reports a failed run and converts it into the exit code of the process.
fn report_failure(err: CliError) -> ExitCode {
    error!("{}", err);

    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        println!("{}", workflow_error_command(&err));
    }

    err.report()
}

/// Main entry point for the commit message checker CLI.
///
/// Initializes logging, parses the command-line arguments and runs the
/// check.
///
/// # Returns
///
/// `ExitCode::SUCCESS` if every message passed or there was nothing to
/// check, otherwise the exit code matching the error.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match commands::check::execute(cli.check).await {
        Ok(outcome) => {
            info!(outcome = ?outcome, "Commit message check finished");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e),
    }
}
