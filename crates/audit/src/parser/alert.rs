//! ModSecurity 알림 라인 파서
//!
//! `ModSecurity:`로 시작하는 라인에서 규칙 매칭 정보를 추출합니다.
//!
//! 한 라인이 알림으로 인정되려면 `id`와 `msg`가 모두 존재해야 합니다.
//! 둘 중 하나라도 없으면 라인 전체가 알림이 아닌 것으로 처리됩니다
//! (엔진 초기화 라인 등 규칙 매칭이 아닌 `ModSecurity:` 라인이 존재함).
//!
//! # 사용 예시
//! ```
//! use logsieve_audit::parser::AlertParser;
//!
//! let parser = AlertParser::new().unwrap();
//! let line = r#"ModSecurity: Warning. [id "942100"] [msg "SQL Injection Attack"]"#;
//! let alert = parser.parse(line).unwrap();
//! assert_eq!(alert.id, "942100");
//! ```

use logsieve_core::types::Alert;
use regex::Regex;

use crate::error::AuditError;
use crate::rules::{ALERT_FIELD_RULES, ALERT_LINE_PREFIX, AlertField, TAG_PATTERN};

/// ModSecurity 알림 라인 파서
///
/// [`ALERT_FIELD_RULES`] 테이블을 생성 시점에 한 번 컴파일해 보관합니다.
pub struct AlertParser {
    fields: Vec<(AlertField, Regex)>,
    tags: Regex,
}

impl AlertParser {
    /// 룰 테이블을 컴파일하여 새 파서를 생성합니다.
    ///
    /// # Errors
    ///
    /// 테이블의 패턴이 컴파일되지 않으면 [`AuditError::Pattern`]을 반환합니다.
    pub fn new() -> Result<Self, AuditError> {
        let mut fields = Vec::with_capacity(ALERT_FIELD_RULES.len());
        for rule in ALERT_FIELD_RULES {
            let re = Regex::new(rule.pattern).map_err(|e| AuditError::Pattern {
                field: rule.field.name().to_owned(),
                reason: e.to_string(),
            })?;
            fields.push((rule.field, re));
        }
        let tags = Regex::new(TAG_PATTERN).map_err(|e| AuditError::Pattern {
            field: "tag".to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { fields, tags })
    }

    /// 라인이 알림 라인 형식인지 확인합니다.
    pub fn is_alert_line(line: &str) -> bool {
        line.starts_with(ALERT_LINE_PREFIX)
    }

    /// 알림 라인에서 [`Alert`]를 파싱합니다.
    ///
    /// `id`와 `msg`가 모두 추출된 경우에만 `Some`을 반환합니다.
    /// 태그는 라인에 나타난 순서대로 전부 수집됩니다.
    pub fn parse(&self, line: &str) -> Option<Alert> {
        let mut id = None;
        let mut msg = None;
        let mut severity = None;
        let mut rule_ref = None;

        for (field, re) in &self.fields {
            if let Some(m) = re.captures(line).and_then(|caps| caps.get(1)) {
                let value = m.as_str().to_owned();
                match field {
                    AlertField::Id => id = Some(value),
                    AlertField::Msg => msg = Some(value),
                    AlertField::Severity => severity = Some(value),
                    AlertField::Ref => rule_ref = Some(value),
                }
            }
        }

        let tags: Vec<String> = self
            .tags
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
            .collect();

        Some(Alert {
            id: id?,
            msg: msg?,
            severity,
            rule_ref,
            tags,
        })
    }
}
