//! 도메인 타입 -- 감사 로그 추출 전반에서 사용되는 공통 타입
//!
//! ModSecurity 감사 로그에서 추출된 데이터를 표현하는 구조체를 정의합니다.
//! 추출 파이프라인과 CLI가 이 타입들을 공유합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 보안 알림
///
/// ModSecurity 규칙 매칭 한 건을 나타냅니다.
/// `id`와 `msg`는 항상 존재하며, 나머지 필드는 로그에 기록된 경우에만 채워집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// 규칙 ID (예: "941100")
    pub id: String,
    /// 규칙 메시지
    pub msg: String,
    /// 심각도 (로그 원문 그대로, 예: "CRITICAL" 또는 "2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// 참조 문자열 (빈 문자열 허용)
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub rule_ref: Option<String>,
    /// 규칙 태그 목록 (없으면 직렬화에서 생략)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} [{}]: {}",
            self.id,
            self.severity.as_deref().unwrap_or("-"),
            self.msg,
        )
    }
}

/// 추출 중인 트랜잭션
///
/// 감사 로그 블록 하나에서 수집 중인 필드를 담는 작업용 타입입니다.
/// 블록 경계(`A--` ~ `Z--`) 사이에서 필드가 점진적으로 채워집니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// ModSecurity 트랜잭션 고유 ID
    pub unique_id: Option<String>,
    /// 블록 헤더 타임스탬프 (로그 원문 그대로)
    pub timestamp: Option<String>,
    /// 요청 URI
    pub uri: Option<String>,
    /// 대상 호스트명
    pub host: Option<String>,
    /// 상호 연관 키 (`X-Req-ID` 헤더 값)
    pub correlation_key: Option<String>,
    /// 블록에서 수집된 알림 목록
    pub alerts: Vec<Alert>,
}

impl Transaction {
    /// 트랜잭션이 유효한지 확인합니다.
    ///
    /// 필수 필드 4개(unique_id, timestamp, uri, host)가 모두
    /// 추출된 경우에만 유효합니다. 하나라도 빠지면 블록 전체가 버려집니다.
    pub fn is_valid(&self) -> bool {
        self.unique_id.is_some()
            && self.timestamp.is_some()
            && self.uri.is_some()
            && self.host.is_some()
    }

    /// 알림이 하나 이상 수집되었는지 확인합니다.
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// 직렬화용 레코드로 변환합니다.
    ///
    /// 유효하지 않은 트랜잭션(필수 필드 누락)은 `None`을 반환합니다.
    pub fn to_record(&self) -> Option<TransactionRecord> {
        if !self.is_valid() {
            return None;
        }
        Some(TransactionRecord {
            request_id: self.unique_id.clone()?,
            primary_key: self.correlation_key.clone(),
            timestamp: self.timestamp.clone()?,
            uri: self.uri.clone()?,
            host: self.host.clone()?,
            alerts: self.alerts.clone(),
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} alerts={}",
            self.unique_id.as_deref().unwrap_or("-"),
            self.host.as_deref().unwrap_or("-"),
            self.uri.as_deref().unwrap_or("-"),
            self.alerts.len(),
        )
    }
}

/// 직렬화용 트랜잭션 레코드
///
/// 추출 결과 JSON 배열의 원소 하나를 나타냅니다.
/// 필드 선언 순서가 곧 JSON 키 순서입니다.
/// `primary_key`는 값이 없어도 `null`로 항상 출력됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// ModSecurity 트랜잭션 고유 ID
    pub request_id: String,
    /// 상호 연관 키 (`X-Req-ID` 헤더 값, 없으면 null)
    pub primary_key: Option<String>,
    /// 블록 헤더 타임스탬프
    pub timestamp: String,
    /// 요청 URI
    pub uri: String,
    /// 대상 호스트명
    pub host: String,
    /// 알림 목록
    pub alerts: Vec<Alert>,
}
