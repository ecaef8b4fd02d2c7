//! `logsieve extract` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logsieve_audit::config::EngineConfig;
use logsieve_audit::engine::{ExtractEngine, ExtractReport};
use logsieve_core::config::LogsieveConfig;
use logsieve_core::error::{ConfigError, LogsieveError};

use crate::cli::ExtractArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `extract` command.
///
/// Loads the configuration, applies any command-line path overrides,
/// runs one extraction pass and renders the result summary.
///
/// # Errors
///
/// Returns `CliError::Config` for invalid path combinations and
/// `CliError::Extract` when the source cannot be read or the output
/// cannot be written. An empty result is not an error; the report
/// carries guidance instead.
pub async fn execute(
    args: ExtractArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_or_default(config_path).await?;

    let mut engine_config = EngineConfig::from_core(&config.extract);
    if let Some(source) = args.source {
        engine_config.source_log = source;
    }
    if let Some(work_dir) = args.work_dir {
        engine_config.work_dir = work_dir;
    }
    if let Some(output_path) = args.output_path {
        engine_config.output_path = output_path;
    }

    info!(source = %engine_config.source_log.display(), "starting extraction");

    let engine = ExtractEngine::builder().config(engine_config).build()?;
    let report = engine.run().await?;

    let payload = ExtractionReport::from_engine_report(&report);
    writer.render(&payload)?;

    Ok(())
}

/// Load the configuration file, or fall back to built-in defaults when
/// the file at the default location does not exist.
///
/// An explicitly passed `--config` path must exist; only the implicit
/// `logsieve.toml` default is optional.
async fn load_or_default(config_path: &Path) -> Result<LogsieveConfig, CliError> {
    match LogsieveConfig::load(config_path).await {
        Ok(config) => Ok(config),
        Err(LogsieveError::Config(ConfigError::FileNotFound { .. }))
            if config_path == Path::new("logsieve.toml") =>
        {
            info!("no logsieve.toml found, using built-in defaults");
            let mut config = LogsieveConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Extraction result summary rendered by the `extract` command.
#[derive(Serialize)]
pub struct ExtractionReport {
    /// Source audit log path
    pub source: String,
    /// Working copy path used for parsing
    pub working_copy: String,
    /// Output JSON path
    pub output: String,
    /// Lines read from the working copy
    pub lines_seen: u64,
    /// Accepted open markers
    pub blocks_opened: u64,
    /// Accepted close markers
    pub blocks_closed: u64,
    /// Ignored boundary markers (wrong state or malformed)
    pub markers_ignored: u64,
    /// Successfully parsed alert lines
    pub alerts_parsed: u64,
    /// Transactions collected in the store (with or without alerts)
    pub stored: usize,
    /// Transactions written to the output file
    pub written: usize,
    /// Blocks dropped for missing required fields
    pub dropped_invalid: u64,
    /// Blocks dropped because EOF arrived before the close marker
    pub dropped_unterminated: u64,
    /// Blocks that overwrote an earlier one with the same unique_id
    pub duplicate_ids: u64,
}

impl ExtractionReport {
    /// Flatten the engine report into the CLI payload.
    pub fn from_engine_report(report: &ExtractReport) -> Self {
        Self {
            source: report.source_log.display().to_string(),
            working_copy: report.working_copy.display().to_string(),
            output: report.output_path.display().to_string(),
            lines_seen: report.stats.lines_seen,
            blocks_opened: report.stats.blocks_opened,
            blocks_closed: report.stats.blocks_closed,
            markers_ignored: report.stats.markers_ignored,
            alerts_parsed: report.stats.alerts_parsed,
            stored: report.stored,
            written: report.written,
            dropped_invalid: report.stats.dropped_invalid,
            dropped_unterminated: report.stats.dropped_unterminated,
            duplicate_ids: report.stats.duplicate_ids,
        }
    }
}

impl Render for ExtractionReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Extraction Report: {}", self.source.bold())?;
        writeln!(w, "  Working copy: {}", self.working_copy)?;
        writeln!(w, "  Output:       {}", self.output)?;
        writeln!(w)?;
        writeln!(w, "  Lines read:      {}", self.lines_seen)?;
        writeln!(
            w,
            "  Blocks:          {} opened, {} closed, {} markers ignored",
            self.blocks_opened, self.blocks_closed, self.markers_ignored
        )?;
        writeln!(w, "  Alerts parsed:   {}", self.alerts_parsed)?;
        writeln!(
            w,
            "  Dropped blocks:  {} missing fields, {} unterminated",
            self.dropped_invalid, self.dropped_unterminated
        )?;
        if self.duplicate_ids > 0 {
            writeln!(
                w,
                "  Duplicates:      {} overwritten by a later block",
                self.duplicate_ids
            )?;
        }
        writeln!(w)?;

        if self.written > 0 {
            writeln!(
                w,
                "  Result: {} of {} transactions written",
                self.written.to_string().green().bold(),
                self.stored
            )?;
        } else {
            writeln!(w, "  Result: {}", "NO TRANSACTIONS EXTRACTED".red().bold())?;
            writeln!(w)?;
            writeln!(w, "  Check:")?;
            writeln!(
                w,
                "  - that the source log contains audit data: {}",
                self.source
            )?;
            writeln!(w, "  - file access permissions")?;
            writeln!(w, "  - the ModSecurity audit logging configuration")?;
        }

        Ok(())
    }
}
