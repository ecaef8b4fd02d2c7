//! 설정 관리 -- logsieve.toml 파싱 및 런타임 설정
//!
//! [`LogsieveConfig`]는 추출 파이프라인 전체의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGSIEVE_EXTRACT_SOURCE_LOG=/var/log/modsec_audit.log` 형식)
//! 3. 설정 파일 (`logsieve.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logsieve_core::error::LogsieveError> {
//! use logsieve_core::config::LogsieveConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogsieveConfig::load("logsieve.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogsieveConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LogsieveError};

/// Logsieve 통합 설정
///
/// `logsieve.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsieveConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 추출 파이프라인 설정
    #[serde(default)]
    pub extract: ExtractConfig,
}

impl LogsieveConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogsieveError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogsieveError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogsieveError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogsieveError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogsieveError> {
        toml::from_str(toml_str).map_err(|e| {
            LogsieveError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGSIEVE_{SECTION}_{FIELD}`
    /// 예: `LOGSIEVE_EXTRACT_SOURCE_LOG=/var/log/modsec_audit.log`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGSIEVE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGSIEVE_GENERAL_LOG_FORMAT");

        // Extract
        override_string(&mut self.extract.source_log, "LOGSIEVE_EXTRACT_SOURCE_LOG");
        override_string(&mut self.extract.work_dir, "LOGSIEVE_EXTRACT_WORK_DIR");
        override_string(&mut self.extract.output_path, "LOGSIEVE_EXTRACT_OUTPUT_PATH");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogsieveError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // 추출 경로 검증
        if self.extract.source_log.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extract.source_log".to_owned(),
                reason: "source_log must not be empty".to_owned(),
            }
            .into());
        }

        if self.extract.work_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extract.work_dir".to_owned(),
                reason: "work_dir must not be empty".to_owned(),
            }
            .into());
        }

        if self.extract.output_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extract.output_path".to_owned(),
                reason: "output_path must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

// Default는 derive 매크로로 자동 생성 (각 필드가 Default를 구현하므로)

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 추출 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 추출 대상 ModSecurity 감사 로그 경로
    pub source_log: String,
    /// 작업 디렉토리 (원본 로그의 작업 사본 위치)
    pub work_dir: String,
    /// 추출 결과 JSON 파일 경로
    pub output_path: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_log: "/var/log/modsec_audit.log".to_owned(),
            work_dir: "./logsieve-work".to_owned(),
            output_path: "./logsieve-work/modsec_audit.json".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}
