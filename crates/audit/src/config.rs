//! 추출 엔진 설정
//!
//! [`EngineConfig`]는 core의 [`ExtractConfig`](logsieve_core::config::ExtractConfig)를
//! 기반으로 추출 엔진 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use logsieve_core::config::LogsieveConfig;
//! use logsieve_audit::config::EngineConfig;
//!
//! let core_config = LogsieveConfig::default();
//! let config = EngineConfig::from_core(&core_config.extract);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// 원본 파일명을 알 수 없을 때 사용하는 작업 사본 이름
const DEFAULT_COPY_NAME: &str = "modsec_audit.log";

/// 추출 엔진 설정
///
/// core의 `ExtractConfig`에서 파생되며, 엔진이 사용하는 경로를
/// `PathBuf`로 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 원본 감사 로그 경로
    pub source_log: PathBuf,
    /// 작업 디렉토리 (원본의 작업 사본이 이곳에 복사됨)
    pub work_dir: PathBuf,
    /// 추출 결과 JSON 경로
    pub output_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            source_log: PathBuf::from("/var/log/modsec_audit.log"),
            work_dir: PathBuf::from("./logsieve-work"),
            output_path: PathBuf::from("./logsieve-work/modsec_audit.json"),
        }
    }
}

impl EngineConfig {
    /// core의 `ExtractConfig`에서 엔진 설정을 생성합니다.
    pub fn from_core(core: &logsieve_core::config::ExtractConfig) -> Self {
        Self {
            source_log: PathBuf::from(&core.source_log),
            work_dir: PathBuf::from(&core.work_dir),
            output_path: PathBuf::from(&core.output_path),
        }
    }

    /// 작업 사본 경로를 반환합니다.
    ///
    /// 작업 디렉토리에 원본과 같은 파일명으로 복사됩니다.
    /// 원본 경로에서 파일명을 얻을 수 없으면 `modsec_audit.log`를 사용합니다.
    pub fn working_copy(&self) -> PathBuf {
        let name = self
            .source_log
            .file_name()
            .unwrap_or_else(|| DEFAULT_COPY_NAME.as_ref());
        self.work_dir.join(name)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.source_log.as_os_str().is_empty() {
            return Err(AuditError::Config {
                field: "source_log".to_owned(),
                reason: "source_log must not be empty".to_owned(),
            });
        }

        if self.work_dir.as_os_str().is_empty() {
            return Err(AuditError::Config {
                field: "work_dir".to_owned(),
                reason: "work_dir must not be empty".to_owned(),
            });
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(AuditError::Config {
                field: "output_path".to_owned(),
                reason: "output_path must not be empty".to_owned(),
            });
        }

        // 작업 사본이 원본과 같은 경로면 복사 시 원본이 먼저 truncate된다
        if self.working_copy() == self.source_log {
            return Err(AuditError::Config {
                field: "work_dir".to_owned(),
                reason: format!(
                    "working copy '{}' would overwrite the source log",
                    self.working_copy().display()
                ),
            });
        }

        // 결과 파일이 원본과 같은 경로면 truncate 단계에서 원본이 비워진다
        if self.output_path == self.source_log {
            return Err(AuditError::Config {
                field: "output_path".to_owned(),
                reason: "output_path must differ from source_log".to_owned(),
            });
        }

        Ok(())
    }
}

/// 엔진 설정 빌더
#[derive(Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 원본 감사 로그 경로를 설정합니다.
    pub fn source_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_log = path.into();
        self
    }

    /// 작업 디렉토리를 설정합니다.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.work_dir = dir.into();
        self
    }

    /// 결과 JSON 경로를 설정합니다.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 설정을 검증하고 `EngineConfig`를 생성합니다.
    pub fn build(self) -> Result<EngineConfig, AuditError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl EngineConfig {
    /// 빌더를 생성합니다.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}
