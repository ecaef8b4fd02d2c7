//! Command-line surface, declared with clap's derive macros
//!
//! Nothing here performs IO; handlers in `commands/` receive the parsed
//! structs and do the work.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Logsieve -- WAF audit log extraction tool.
///
/// Use `logsieve <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logsieve", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, default_value = "logsieve.toml")]
    pub config: PathBuf,

    /// Log filter for diagnostics on stderr (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Report format on stdout.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a one-shot extraction from the audit log to JSON.
    Extract(ExtractArgs),

    /// Inspect the built-in extraction pattern rules.
    Rules(RulesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- extract ----

/// Run a one-shot extraction pass.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Override the source audit log path from the configuration.
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Override the working directory from the configuration.
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Override the output JSON path from the configuration.
    #[arg(short = 'o', long)]
    pub output_path: Option<PathBuf>,
}

// ---- rules ----

/// Inspect the extraction pattern rules.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List transaction field rules and their patterns.
    List {
        /// Filter by field name (timestamp, unique_id, uri, host, correlation_key).
        #[arg(long)]
        field: Option<String>,
    },
    /// List alert line rules (tag patterns and required fields).
    Alerts,
    /// Show the block boundary marker constants.
    Markers,
}

// ---- config ----

/// Manage logsieve configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Load the configuration file and report whether it is usable.
    Validate,
    /// Print the effective configuration (defaults + file + env overrides).
    Show {
        /// Limit output to one section (general, extract).
        #[arg(long)]
        section: Option<String>,
    },
}
