//! 감사 로그 블록 분할기
//!
//! ModSecurity serial 감사 로그를 라인 단위로 순회하면서 블록 경계
//! 마커(`--- <id> ---<섹션>--`)를 추적하는 상태 머신입니다. 블록
//! 내부 라인은 [`FieldExtractor`]와 [`AlertParser`]에 전달되고, 닫힌
//! 블록 중 필수 필드를 모두 갖춘 것만 [`TransactionStore`]에
//! 업서트됩니다.

use serde::Serialize;
use tracing::debug;

use logsieve_core::Transaction;

use crate::error::AuditError;
use crate::parser::{AlertParser, FieldExtractor};
use crate::rules::{BOUNDARY_MARKER, SECTION_CLOSE, SECTION_INDEX, SECTION_OPEN};
use crate::store::TransactionStore;

/// 분할 과정 집계 통계
///
/// 버려진 블록은 개별 보고 없이 여기에만 집계됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentStats {
    /// 입력에서 읽은 전체 라인 수
    pub lines_seen: u64,
    /// 수락된 열림 마커 수
    pub blocks_opened: u64,
    /// 수락된 닫힘 마커 수
    pub blocks_closed: u64,
    /// 무시된 경계 마커 수 (상태 불일치 또는 형식 불량)
    pub markers_ignored: u64,
    /// 파싱에 성공한 알림 라인 수
    pub alerts_parsed: u64,
    /// 필수 필드 누락으로 버려진 블록 수
    pub dropped_invalid: u64,
    /// EOF 시점에 닫히지 않아 버려진 블록 수
    pub dropped_unterminated: u64,
    /// 같은 unique_id 재등장으로 덮어쓴 횟수
    pub duplicate_ids: u64,
}

/// 블록 경계 상태 머신
///
/// 상태는 두 가지뿐입니다. 열린 블록이 없으면 Idle, 있으면 Active.
/// `current`가 `None`/`Some`인 것이 곧 상태입니다.
///
/// # 상태 전이
///
/// - Idle에서 `A--` 마커를 만나면 새 트랜잭션을 열고 Active로 전이
/// - Active에서 `Z--` 마커를 만나면 블록을 닫고 Idle로 전이
/// - 그 외의 마커는 상태를 바꾸지 않고 무시 (Active 중의 `A--` 포함)
/// - 마커 라인은 무시된 것까지 전부 여기서 소비되며 파서에 전달되지
///   않음
///
/// # 사용 예시
///
/// ```
/// use logsieve_audit::segmenter::LogSegmenter;
///
/// let mut segmenter = LogSegmenter::new().unwrap();
/// for line in "--- x1 ---A--\n[27/Oct/2025:10:00:00 +0000] 1.2\n--- x1 ---Z--".lines() {
///     segmenter.feed_line(line);
/// }
/// let (store, stats) = segmenter.finish();
/// assert_eq!(stats.blocks_opened, 1);
/// // uri와 host가 없으므로 블록은 버려진다
/// assert!(store.is_empty());
/// assert_eq!(stats.dropped_invalid, 1);
/// ```
pub struct LogSegmenter {
    /// 현재 열린 블록. `None`이면 Idle 상태
    current: Option<Transaction>,
    extractor: FieldExtractor,
    alerts: AlertParser,
    store: TransactionStore,
    stats: SegmentStats,
}

impl LogSegmenter {
    /// 필드 규칙과 알림 규칙을 컴파일하여 새 분할기를 생성합니다.
    pub fn new() -> Result<Self, AuditError> {
        Ok(Self {
            current: None,
            extractor: FieldExtractor::new()?,
            alerts: AlertParser::new()?,
            store: TransactionStore::new(),
            stats: SegmentStats::default(),
        })
    }

    /// 열린 블록이 있으면 true를 반환합니다.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// 현재 상태 이름을 반환합니다 (로그/진단용).
    pub fn state_name(&self) -> &'static str {
        if self.current.is_some() { "active" } else { "idle" }
    }

    /// 지금까지의 집계 통계 스냅샷을 반환합니다.
    pub fn stats(&self) -> SegmentStats {
        self.stats
    }

    /// 지금까지 저장된 트랜잭션 수를 반환합니다.
    pub fn stored_count(&self) -> usize {
        self.store.len()
    }

    /// 입력 한 라인을 처리합니다.
    ///
    /// 라인 앞뒤 공백은 제거한 뒤 판정합니다. 경계 마커로 시작하는
    /// 라인은 상태 전이에만 쓰이고, 그 외 라인은 Active 상태일 때만
    /// 필드 추출기와 알림 파서에 전달됩니다.
    pub fn feed_line(&mut self, raw_line: &str) {
        self.stats.lines_seen += 1;
        let line = raw_line.trim();

        if line.starts_with(BOUNDARY_MARKER) {
            self.handle_marker(line);
            return;
        }

        // Idle 상태의 비마커 라인은 블록 밖이므로 버린다
        if let Some(tx) = self.current.as_mut() {
            self.extractor.apply_line(line, tx);
            if AlertParser::is_alert_line(line) {
                if let Some(alert) = self.alerts.parse(line) {
                    tx.alerts.push(alert);
                    self.stats.alerts_parsed += 1;
                }
            }
        }
    }

    /// 분할을 종료하고 저장소와 통계를 반환합니다.
    ///
    /// EOF 시점에 아직 열려 있는 블록은 잘린 것으로 간주하여 저장하지
    /// 않습니다. 버려진 블록은 `dropped_unterminated`에만 집계됩니다.
    pub fn finish(mut self) -> (TransactionStore, SegmentStats) {
        if let Some(tx) = self.current.take() {
            self.stats.dropped_unterminated += 1;
            debug!(transaction = %tx, "dropping unterminated block at end of input");
        }
        (self.store, self.stats)
    }

    /// 경계 마커 라인 하나를 처리합니다.
    ///
    /// 마커를 `---`로 나눴을 때 세 번째 조각이 섹션 코드입니다.
    /// 조각이 모자라면 형식 불량으로 무시합니다.
    fn handle_marker(&mut self, line: &str) {
        let section = match line.split(BOUNDARY_MARKER).nth(SECTION_INDEX) {
            Some(section) => section,
            None => {
                self.stats.markers_ignored += 1;
                return;
            }
        };

        if section == SECTION_OPEN && self.current.is_none() {
            self.current = Some(Transaction::default());
            self.stats.blocks_opened += 1;
        } else if section == SECTION_CLOSE && self.current.is_some() {
            self.close_block();
            self.stats.blocks_closed += 1;
        } else {
            // 알 수 없는 섹션 코드이거나 현재 상태에 맞지 않는 마커
            self.stats.markers_ignored += 1;
        }
    }

    /// 현재 블록을 닫고 유효하면 저장소에 업서트합니다.
    fn close_block(&mut self) {
        let Some(tx) = self.current.take() else {
            return;
        };

        if !tx.is_valid() {
            self.stats.dropped_invalid += 1;
            debug!(transaction = %tx, "dropping block missing required fields");
            return;
        }

        // is_valid가 참이면 unique_id는 항상 존재한다
        if let Some(key) = tx.unique_id.clone() {
            if !self.store.upsert(key.clone(), tx) {
                self.stats.duplicate_ids += 1;
                debug!(unique_id = %key, "duplicate unique_id overwrote earlier block");
            }
        }
    }
}
