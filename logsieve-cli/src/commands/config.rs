//! `logsieve config` command handler
//!
//! Inspects the resolved configuration (defaults, file values, env
//! overrides) without running an extraction.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logsieve_core::config::LogsieveConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load the configuration purely to report whether it is usable.
///
/// # Errors
///
/// Returns `CliError::Config` when the file fails to parse or validate,
/// after the failure report has been rendered.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let errors = match LogsieveConfig::load(config_path).await {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.to_string()],
    };

    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration did not validate".to_owned()));
    }
    Ok(())
}

/// Render the effective configuration, optionally narrowed to one section.
///
/// # Errors
///
/// Returns `CliError::Command` for an unknown section name, or the
/// underlying config error when loading fails.
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = LogsieveConfig::load(config_path).await?;

    let config_toml = match section.as_deref() {
        None => serialize_toml(&config),
        Some("general") => serialize_toml(&config.general),
        Some("extract") => serialize_toml(&config.extract),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, extract)",
                other
            )));
        }
    };

    writer.render(&ConfigReport {
        source: config_path.display().to_string(),
        section,
        config_toml,
    })?;
    Ok(())
}

fn serialize_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Effective-configuration report.
///
/// `config_toml` only feeds the text renderer; JSON consumers get the
/// source path and section name and should read the file themselves.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match &self.section {
            Some(name) => writeln!(
                w,
                "Effective configuration, section {} ({})",
                format!("[{}]", name).bold(),
                self.source
            )?,
            None => writeln!(w, "Effective configuration ({})", self.source.bold())?,
        }
        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Result of `config validate`.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Load or validation failures; empty when valid.
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Validating {}", self.source.bold())?;
        if self.valid {
            writeln!(w, "  {}", "OK".green().bold())?;
        } else {
            writeln!(w, "  {}", "FAILED".red().bold())?;
            for err in &self.errors {
                writeln!(w, "    - {}", err.red())?;
            }
        }
        Ok(())
    }
}
