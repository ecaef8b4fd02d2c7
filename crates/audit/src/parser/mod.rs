//! 라인 파싱 모듈 -- 필드 추출과 알림 파싱
//!
//! 블록 내부의 라인은 두 단계로 처리됩니다.
//! 1. [`FieldExtractor`]가 모든 라인에서 트랜잭션 필드를 갱신
//! 2. 알림 접두사(`ModSecurity:`)가 있는 라인만 [`AlertParser`]가 추가 처리
//!
//! 같은 라인이 두 단계를 모두 거칠 수 있습니다. 알림 라인에는
//! `[uri "..."]`, `[hostname "..."]` 태그도 실려 오므로, 필드 추출을
//! 건너뛰면 트랜잭션 필드가 비는 경우가 생깁니다.
//!
//! 두 파서 모두 [`crate::rules`]의 선언 테이블을 생성 시점에 컴파일합니다.

pub mod alert;
pub mod fields;

pub use alert::AlertParser;
pub use fields::FieldExtractor;
