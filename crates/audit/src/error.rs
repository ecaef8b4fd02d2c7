//! 감사 로그 추출 에러 타입
//!
//! [`AuditError`]는 추출 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<AuditError> for LogsieveError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logsieve_core::error::{ConfigError, ExtractError, LogsieveError};

/// 감사 로그 추출 도메인 에러
///
/// 원본 접근, 패턴 컴파일, 결과 기록 등 추출 파이프라인 내부의
/// 모든 에러 상황을 포괄합니다.
///
/// 개별 블록의 필드 누락(패턴 미스)은 에러가 아니라 해당 블록의
/// 드롭으로 처리되므로 여기에 포함되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// 원본 감사 로그 접근 실패 (읽기, 작업 사본 복사 포함)
    #[error("source access error: {path}: {reason}")]
    SourceAccess {
        /// 접근에 실패한 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 추출 패턴 컴파일 실패
    #[error("pattern error: field '{field}': {reason}")]
    Pattern {
        /// 패턴이 속한 필드명
        field: String,
        /// 컴파일 실패 사유
        reason: String,
    },

    /// 결과 파일 기록 실패 (직렬화 실패 포함)
    #[error("output write error: {path}: {reason}")]
    OutputWrite {
        /// 기록에 실패한 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AuditError> for LogsieveError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::SourceAccess { path, reason } => {
                ExtractError::SourceAccess { path, reason }.into()
            }
            AuditError::Pattern { field, reason } => ExtractError::Pattern { field, reason }.into(),
            AuditError::OutputWrite { path, reason } => {
                ExtractError::OutputWrite { path, reason }.into()
            }
            AuditError::Config { field, reason } => {
                ConfigError::InvalidValue { field, reason }.into()
            }
            AuditError::Io(e) => LogsieveError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_access_error_display() {
        let err = AuditError::SourceAccess {
            path: "/var/log/modsec_audit.log".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("modsec_audit.log"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn pattern_error_display() {
        let err = AuditError::Pattern {
            field: "unique_id".to_owned(),
            reason: "unclosed group".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unique_id"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn source_access_converts_to_extract_error() {
        let err = AuditError::SourceAccess {
            path: "/tmp/audit.log".to_owned(),
            reason: "not found".to_owned(),
        };
        let logsieve_err: LogsieveError = err.into();
        assert!(matches!(
            logsieve_err,
            LogsieveError::Extract(ExtractError::SourceAccess { .. })
        ));
    }

    #[test]
    fn config_converts_to_config_error() {
        let err = AuditError::Config {
            field: "source_log".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        let logsieve_err: LogsieveError = err.into();
        assert!(matches!(
            logsieve_err,
            LogsieveError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn io_converts_to_io_error() {
        let err = AuditError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let logsieve_err: LogsieveError = err.into();
        assert!(matches!(logsieve_err, LogsieveError::Io(_)));
    }
}
