//! Format switching between human-readable text and machine-readable JSON
//!
//! Every subcommand builds a report struct that implements both [`Render`]
//! and `Serialize`, then hands it to [`OutputWriter::render`]. Command
//! handlers never branch on the output format themselves.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command reports to stdout in the format selected by `--output`.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a report to stdout.
    ///
    /// Text mode goes through [`Render::render_text`]; JSON mode is
    /// pretty-printed so the output is diffable alongside the extraction
    /// artifact itself.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let mut out = std::io::stdout().lock();
        match self.format {
            OutputFormat::Text => payload.render_text(&mut out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, payload)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering, implemented by every command report.
///
/// Takes `&mut dyn Write` so tests can render into a buffer instead of
/// stdout.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}
