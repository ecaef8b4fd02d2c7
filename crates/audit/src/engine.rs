//! 추출 엔진
//!
//! 원본 감사 로그를 작업 사본으로 복사하고, 사본을 분할/파싱한 뒤,
//! 알림이 있는 유효 트랜잭션을 JSON 파일로 직렬화하는 전체 흐름을
//! 담당합니다. 원본 로그 자체는 읽기 전용으로만 취급합니다.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::AuditError;
use crate::segmenter::{LogSegmenter, SegmentStats};

/// 추출 실행 한 번의 결과 요약
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    /// 원본 감사 로그 경로
    pub source_log: PathBuf,
    /// 파싱에 사용된 작업 사본 경로
    pub working_copy: PathBuf,
    /// JSON 출력 파일 경로
    pub output_path: PathBuf,
    /// 저장소에 수집된 트랜잭션 수 (알림 없는 것 포함)
    pub stored: usize,
    /// 출력 파일에 기록된 트랜잭션 수
    pub written: usize,
    /// 분할 단계 집계 통계
    pub stats: SegmentStats,
}

/// 감사 로그 추출 엔진
///
/// 설정된 경로에 대해 복사, 분할, 직렬화 단계를 순서대로 실행합니다.
///
/// # 실행 단계
///
/// 1. 작업 디렉토리와 출력 디렉토리를 생성하고, 이전 실행 결과가
///    남지 않도록 작업 사본과 출력 파일을 비웁니다.
/// 2. 원본 로그를 작업 사본으로 복사합니다. 실패하면 즉시 에러를
///    반환합니다.
/// 3. 작업 사본을 읽어 라인 단위로 분할기에 전달합니다.
/// 4. 알림이 하나 이상 있는 유효 트랜잭션을 JSON 배열로 출력
///    파일에 기록합니다. 기록할 것이 없으면 출력 파일은 빈 채로
///    남습니다.
///
/// # 사용 예시
///
/// ```no_run
/// use logsieve_audit::config::EngineConfig;
/// use logsieve_audit::engine::ExtractEngine;
///
/// # async fn example() -> Result<(), logsieve_audit::error::AuditError> {
/// let engine = ExtractEngine::builder()
///     .config(EngineConfig::default())
///     .build()?;
/// let report = engine.run().await?;
/// println!("{} transactions written", report.written);
/// # Ok(())
/// # }
/// ```
pub struct ExtractEngine {
    config: EngineConfig,
}

impl ExtractEngine {
    /// 빌더를 반환합니다.
    pub fn builder() -> ExtractEngineBuilder {
        ExtractEngineBuilder::new()
    }

    /// 설정을 검증한 뒤 엔진을 생성합니다.
    pub fn new(config: EngineConfig) -> Result<Self, AuditError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 엔진이 사용하는 설정을 반환합니다.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 추출을 한 번 실행하고 결과 요약을 반환합니다.
    pub async fn run(&self) -> Result<ExtractReport, AuditError> {
        let source_log = &self.config.source_log;
        let working_copy = self.config.working_copy();
        let output_path = &self.config.output_path;

        self.prepare(&working_copy).await?;

        tokio::fs::copy(source_log, &working_copy)
            .await
            .map_err(|e| AuditError::SourceAccess {
                path: source_log.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            source = %source_log.display(),
            copy = %working_copy.display(),
            "copied source log to working copy"
        );

        let raw = tokio::fs::read(&working_copy)
            .await
            .map_err(|e| AuditError::SourceAccess {
                path: working_copy.display().to_string(),
                reason: e.to_string(),
            })?;
        // 잘못된 UTF-8 바이트는 대체 문자로 바꾸고 계속 진행한다
        let text = String::from_utf8_lossy(&raw);

        let mut segmenter = LogSegmenter::new()?;
        for line in text.lines() {
            segmenter.feed_line(line);
        }
        let (store, stats) = segmenter.finish();

        let stored = store.len();
        let records = store.records();
        let written = records.len();
        debug!(
            lines = stats.lines_seen,
            stored, written, "segmented working copy"
        );

        if records.is_empty() {
            warn!(
                source = %source_log.display(),
                stored,
                "no valid transactions with alerts found"
            );
        } else {
            let json = serde_json::to_string_pretty(&records).map_err(|e| {
                AuditError::OutputWrite {
                    path: output_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            tokio::fs::write(output_path, json)
                .await
                .map_err(|e| AuditError::OutputWrite {
                    path: output_path.display().to_string(),
                    reason: e.to_string(),
                })?;
            info!(
                written,
                output = %output_path.display(),
                "wrote extracted transactions"
            );
        }

        Ok(ExtractReport {
            source_log: source_log.clone(),
            working_copy,
            output_path: output_path.clone(),
            stored,
            written,
            stats,
        })
    }

    /// 작업 디렉토리를 만들고 작업 사본과 출력 파일을 비웁니다.
    ///
    /// 출력 파일을 먼저 비워 두면 이번 실행이 아무것도 기록하지
    /// 않더라도 이전 실행의 결과가 남지 않습니다.
    async fn prepare(&self, working_copy: &std::path::Path) -> Result<(), AuditError> {
        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        if let Some(parent) = self.config.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::File::create(working_copy).await?;
        tokio::fs::File::create(&self.config.output_path)
            .await
            .map_err(|e| AuditError::OutputWrite {
                path: self.config.output_path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// [`ExtractEngine`] 빌더
#[derive(Debug, Default)]
pub struct ExtractEngineBuilder {
    config: Option<EngineConfig>,
}

impl ExtractEngineBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 엔진 설정을 지정합니다. 지정하지 않으면 기본값을 사용합니다.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 설정을 검증하고 엔진을 생성합니다.
    pub fn build(self) -> Result<ExtractEngine, AuditError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok(ExtractEngine { config })
    }
}
