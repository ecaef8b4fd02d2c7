#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`rules`]: 필드/알림 추출 패턴 테이블 (선언적 규칙 정의)
//! - [`parser`]: 블록 내부 라인에서 필드와 알림을 추출하는 파서
//! - [`segmenter`]: 블록 경계 마커를 추적하는 상태 머신
//! - [`store`]: 삽입 순서를 보존하는 트랜잭션 저장소
//! - [`engine`]: 복사, 분할, 직렬화를 묶는 추출 엔진
//! - [`config`]: 추출 엔진 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! source log -> working copy -> LogSegmenter -> TransactionStore -> JSON output
//!                                  |
//!                     FieldExtractor + AlertParser
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub mod parser;
pub mod rules;
pub mod segmenter;
pub mod store;

// --- 주요 타입 re-export ---

// 엔진
pub use engine::{ExtractEngine, ExtractEngineBuilder, ExtractReport};

// 설정
pub use config::{EngineConfig, EngineConfigBuilder};

// 에러
pub use error::AuditError;

// 파서
pub use parser::{AlertParser, FieldExtractor};

// 규칙 테이블
pub use rules::{AlertField, FieldRule, TransactionField, UpdatePolicy};

// 분할기
pub use segmenter::{LogSegmenter, SegmentStats};

// 저장소
pub use store::TransactionStore;
