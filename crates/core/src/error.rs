//! 에러 타입 -- 도메인별 에러 정의

/// Logsieve 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogsieveError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 추출 파이프라인 에러
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 추출 파이프라인 에러
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// 원본 감사 로그 접근 실패
    #[error("source log access failed for '{path}': {reason}")]
    SourceAccess { path: String, reason: String },

    /// 추출 패턴 컴파일 실패
    #[error("pattern compile failed for field '{field}': {reason}")]
    Pattern { field: String, reason: String },

    /// 결과 파일 기록 실패
    #[error("output write failed for '{path}': {reason}")]
    OutputWrite { path: String, reason: String },
}
