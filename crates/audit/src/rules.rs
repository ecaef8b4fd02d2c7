//! 추출 룰 테이블 -- 필드별 패턴과 갱신 정책의 선언 테이블
//!
//! ModSecurity serial 감사 로그에서 무엇을 어떻게 추출할지를
//! 데이터 테이블로 정의합니다. 파서는 이 테이블을 순회할 뿐
//! 필드별 분기 로직을 갖지 않으므로, 새 필드 추가는 테이블에
//! 항목을 더하는 것으로 끝납니다.
//!
//! 패턴 원문은 컴파일되지 않은 정규식 문자열이며,
//! [`FieldExtractor`](crate::parser::FieldExtractor)와
//! [`AlertParser`](crate::parser::AlertParser)가 생성 시점에 컴파일합니다.

/// 블록 경계 라인 마커 (라인 접두사이자 섹션 구분자)
pub const BOUNDARY_MARKER: &str = "---";

/// 블록을 여는 섹션 코드 (`--- id ---A--` 형식의 세 번째 조각)
pub const SECTION_OPEN: &str = "A--";

/// 블록을 닫는 섹션 코드
pub const SECTION_CLOSE: &str = "Z--";

/// 경계 라인에서 섹션 코드가 위치하는 조각 인덱스
///
/// `---`로 분할했을 때 조각이 이 인덱스까지 존재하지 않으면
/// 형식 불량 마커로 간주하고 무시합니다.
pub const SECTION_INDEX: usize = 2;

/// 알림 라인 접두사
pub const ALERT_LINE_PREFIX: &str = "ModSecurity:";

/// 트랜잭션 필드 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    /// 블록 헤더 타임스탬프
    Timestamp,
    /// 트랜잭션 고유 ID
    UniqueId,
    /// 요청 URI
    Uri,
    /// 대상 호스트명
    Host,
    /// 상호 연관 키 (`X-Req-ID` 헤더 값)
    CorrelationKey,
}

impl TransactionField {
    /// 필드명을 반환합니다 (에러 메시지와 진단 출력용).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::UniqueId => "unique_id",
            Self::Uri => "uri",
            Self::Host => "host",
            Self::CorrelationKey => "correlation_key",
        }
    }
}

/// 필드 갱신 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// 블록 안에서 처음 매칭된 값을 유지
    FirstWins,
    /// 매칭될 때마다 덮어써서 마지막 값을 유지
    LastWins,
}

impl UpdatePolicy {
    /// 정책명을 반환합니다 (진단 출력용).
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstWins => "first-wins",
            Self::LastWins => "last-wins",
        }
    }
}

/// 트랜잭션 필드 추출 룰
///
/// `patterns`는 우선순위 순서이며, 한 라인에서 앞의 패턴이 매칭되면
/// 뒤의 패턴(폴백)은 시도하지 않습니다.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// 값을 기록할 트랜잭션 필드
    pub field: TransactionField,
    /// 갱신 정책
    pub policy: UpdatePolicy,
    /// 정규식 패턴 목록 (첫 캡처 그룹이 필드 값)
    pub patterns: &'static [&'static str],
}

/// 트랜잭션 필드 룰 테이블
///
/// - `timestamp`: 라인 선두의 대괄호 토큰, 블록당 최초 1회
/// - `unique_id`: 소수점 숫자 토큰 우선, `unique_id "..."` 태그 폴백
/// - `uri` / `host` / `correlation_key`: 블록 안의 마지막 매칭 유지
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: TransactionField::Timestamp,
        policy: UpdatePolicy::FirstWins,
        patterns: &[r"^\[([^\]]+)\]"],
    },
    FieldRule {
        field: TransactionField::UniqueId,
        policy: UpdatePolicy::FirstWins,
        patterns: &[r"\b(\d+\.\d+)\b", r#"unique_id\s+"([^"]+)""#],
    },
    FieldRule {
        field: TransactionField::Uri,
        policy: UpdatePolicy::LastWins,
        patterns: &[r#"\[uri\s+"([^"]+)"\]"#],
    },
    FieldRule {
        field: TransactionField::Host,
        policy: UpdatePolicy::LastWins,
        patterns: &[r#"\[hostname\s+"([^"]+)"\]"#],
    },
    FieldRule {
        field: TransactionField::CorrelationKey,
        policy: UpdatePolicy::LastWins,
        patterns: &[r"X-Req-ID:([A-Za-z0-9\-]+)"],
    },
];

/// 알림 필드 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertField {
    /// 규칙 ID (필수)
    Id,
    /// 규칙 메시지 (필수)
    Msg,
    /// 심각도
    Severity,
    /// 참조 문자열 (빈 값 허용)
    Ref,
}

impl AlertField {
    /// 필드명을 반환합니다 (에러 메시지와 진단 출력용).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Msg => "msg",
            Self::Severity => "severity",
            Self::Ref => "ref",
        }
    }
}

/// 알림 필드 추출 룰
#[derive(Debug, Clone, Copy)]
pub struct AlertFieldRule {
    /// 값을 기록할 알림 필드
    pub field: AlertField,
    /// 정규식 패턴 (첫 캡처 그룹이 필드 값)
    pub pattern: &'static str,
}

/// 알림 필드 룰 테이블
///
/// `ref`만 빈 문자열 캡처를 허용합니다 (`[ref ""]` 형태가 실제로 기록됨).
pub const ALERT_FIELD_RULES: &[AlertFieldRule] = &[
    AlertFieldRule {
        field: AlertField::Id,
        pattern: r#"\[id\s+"([^"]+)"\]"#,
    },
    AlertFieldRule {
        field: AlertField::Msg,
        pattern: r#"\[msg\s+"([^"]+)"\]"#,
    },
    AlertFieldRule {
        field: AlertField::Severity,
        pattern: r#"\[severity\s+"([^"]+)"\]"#,
    },
    AlertFieldRule {
        field: AlertField::Ref,
        pattern: r#"\[ref\s+"([^"]*)"\]"#,
    },
];

/// 알림 태그 패턴 (한 라인에서 전부 수집)
pub const TAG_PATTERN: &str = r#"\[tag\s+"([^"]+)"\]"#;
