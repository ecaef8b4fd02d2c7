//! Logsieve CLI entry point.
//!
//! Parses command-line arguments, initializes tracing, and dispatches to
//! the matching command handler. Diagnostics go to stderr so stdout stays
//! clean for rendered reports (important for `--output json` piping).

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_deref());

    tracing::info!(config = %cli.config.display(), "logsieve starting");

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// Filter precedence: `--log-level` flag, then `RUST_LOG`, then `warn`.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => level.to_owned(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter.as_str())
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch the parsed command to its handler.
async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Extract(args) => commands::extract::execute(args, &cli.config, &writer).await,
        Commands::Rules(args) => commands::rules::execute(args, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
