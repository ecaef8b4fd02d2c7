//! 트랜잭션 저장소 -- 삽입 순서를 보존하는 업서트 맵

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use logsieve_core::types::{Transaction, TransactionRecord};

/// 트랜잭션 저장소
///
/// `unique_id`를 키로 트랜잭션을 보관합니다. 같은 키로 다시 저장하면
/// 값은 교체되지만 처음 삽입된 위치는 유지됩니다. 결과 직렬화 순서가
/// 로그 등장 순서와 같아야 하므로, 순서를 보장하지 않는 해시맵 대신
/// 벡터와 키→위치 인덱스의 조합으로 구현합니다.
#[derive(Debug, Default)]
pub struct TransactionStore {
    /// 삽입 순서대로 보관되는 트랜잭션
    entries: Vec<Transaction>,
    /// unique_id → entries 위치
    index: HashMap<String, usize>,
}

impl TransactionStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 트랜잭션을 저장합니다.
    ///
    /// 새 키면 끝에 추가하고 `true`를 반환합니다.
    /// 이미 있는 키면 기존 위치의 값을 교체하고 `false`를 반환합니다.
    pub fn upsert(&mut self, key: String, tx: Transaction) -> bool {
        match self.index.entry(key) {
            Entry::Occupied(slot) => {
                self.entries[*slot.get()] = tx;
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push(tx);
                true
            }
        }
    }

    /// 키로 트랜잭션을 조회합니다.
    pub fn get(&self, key: &str) -> Option<&Transaction> {
        self.index.get(key).and_then(|i| self.entries.get(*i))
    }

    /// 보관 중인 트랜잭션 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 삽입 순서대로 트랜잭션을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// 직렬화용 레코드 목록을 생성합니다.
    ///
    /// 알림이 하나 이상 있는 트랜잭션만 포함되며,
    /// 순서는 삽입 순서를 따릅니다.
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.entries
            .iter()
            .filter(|tx| tx.has_alerts())
            .filter_map(|tx| tx.to_record())
            .collect()
    }
}
