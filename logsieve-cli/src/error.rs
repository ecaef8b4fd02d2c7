//! Error type for the logsieve binary and its process exit codes

use logsieve_audit::AuditError;
use logsieve_core::LogsieveError;

/// Everything a subcommand can fail with.
///
/// Variants are coarse on purpose: the user-facing message carries the
/// detail, the variant only decides the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad subcommand input (unknown section name and the like).
    #[error("{0}")]
    Command(String),

    /// The extraction run itself failed (source access, output write).
    #[error("extraction error: {0}")]
    Extract(String),

    /// JSON rendering of a report failed.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Domain error surfaced unchanged from logsieve-core.
    #[error("{0}")]
    Core(#[from] LogsieveError),
}

impl CliError {
    /// Exit code for the process: 2 for configuration problems, 4 for a
    /// failed extraction run, 10 for IO, 1 for everything else. Wrapped
    /// core errors map by their domain, so a config failure exits 2 no
    /// matter which layer reported it.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(LogsieveError::Config(_)) => 2,
            Self::Extract(_) | Self::Core(LogsieveError::Extract(_)) => 4,
            Self::Io(_) | Self::Core(LogsieveError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<AuditError> for CliError {
    fn from(e: AuditError) -> Self {
        match e {
            AuditError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Extract(other.to_string()),
        }
    }
}
