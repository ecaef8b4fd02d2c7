//! 트랜잭션 필드 추출기
//!
//! 블록 내부의 각 라인에서 [`FIELD_RULES`] 테이블에 정의된 필드를 찾아
//! 작업 중인 [`Transaction`]에 반영합니다.
//!
//! 매칭 실패는 에러가 아닙니다. 해당 필드가 비어 있는 채로 남을 뿐이며,
//! 블록이 닫힐 때 유효성 검사에서 걸러집니다.
//!
//! # 사용 예시
//! ```
//! use logsieve_audit::parser::FieldExtractor;
//! use logsieve_core::types::Transaction;
//!
//! let extractor = FieldExtractor::new().unwrap();
//! let mut tx = Transaction::default();
//! extractor.apply_line(r#"[uri "/login"] [hostname "example.com"]"#, &mut tx);
//! assert_eq!(tx.uri.as_deref(), Some("/login"));
//! assert_eq!(tx.host.as_deref(), Some("example.com"));
//! ```

use logsieve_core::types::Transaction;
use regex::Regex;

use crate::error::AuditError;
use crate::rules::{FIELD_RULES, FieldRule, TransactionField, UpdatePolicy};

/// 컴파일된 필드 룰
struct CompiledRule {
    field: TransactionField,
    policy: UpdatePolicy,
    /// 우선순위 순서의 패턴 (앞이 매칭되면 뒤는 시도하지 않음)
    patterns: Vec<Regex>,
}

impl CompiledRule {
    fn compile(rule: &FieldRule) -> Result<Self, AuditError> {
        let mut patterns = Vec::with_capacity(rule.patterns.len());
        for pattern in rule.patterns {
            let re = Regex::new(pattern).map_err(|e| AuditError::Pattern {
                field: rule.field.name().to_owned(),
                reason: e.to_string(),
            })?;
            patterns.push(re);
        }
        Ok(Self {
            field: rule.field,
            policy: rule.policy,
            patterns,
        })
    }
}

/// 트랜잭션 필드 추출기
///
/// [`FIELD_RULES`] 테이블을 생성 시점에 한 번 컴파일해 보관합니다.
/// 필드별 분기 없이 테이블을 순회하므로, 각 필드의 갱신 정책
/// (first-wins / last-wins)은 룰 테이블이 결정합니다.
pub struct FieldExtractor {
    rules: Vec<CompiledRule>,
}

impl FieldExtractor {
    /// 룰 테이블을 컴파일하여 새 추출기를 생성합니다.
    ///
    /// # Errors
    ///
    /// 테이블의 패턴이 컴파일되지 않으면 [`AuditError::Pattern`]을 반환합니다.
    pub fn new() -> Result<Self, AuditError> {
        let mut rules = Vec::with_capacity(FIELD_RULES.len());
        for rule in FIELD_RULES {
            rules.push(CompiledRule::compile(rule)?);
        }
        Ok(Self { rules })
    }

    /// 한 라인을 적용하여 트랜잭션 필드를 갱신합니다.
    pub fn apply_line(&self, line: &str, tx: &mut Transaction) {
        for rule in &self.rules {
            // first-wins 필드는 이미 값이 있으면 이후 매칭을 무시한다
            if rule.policy == UpdatePolicy::FirstWins && slot(tx, rule.field).is_some() {
                continue;
            }
            for re in &rule.patterns {
                if let Some(caps) = re.captures(line) {
                    if let Some(m) = caps.get(1) {
                        *slot(tx, rule.field) = Some(m.as_str().to_owned());
                    }
                    break;
                }
            }
        }
    }
}

/// 필드 식별자를 트랜잭션의 해당 슬롯으로 변환합니다.
fn slot(tx: &mut Transaction, field: TransactionField) -> &mut Option<String> {
    match field {
        TransactionField::Timestamp => &mut tx.timestamp,
        TransactionField::UniqueId => &mut tx.unique_id,
        TransactionField::Uri => &mut tx.uri,
        TransactionField::Host => &mut tx.host,
        TransactionField::CorrelationKey => &mut tx.correlation_key,
    }
}
