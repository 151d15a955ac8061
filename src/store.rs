// 💾 Score Store - identifier → points for the lifetime of the process
// Records are written once and never mutated or evicted

use crate::receipt::Receipt;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no receipt stored under id {0}")]
    NotFound(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// A scored receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub points: u64,
    pub receipt: Receipt,
}

/// Storage seam for scored receipts. Identifiers come from the caller.
pub trait ReceiptStore: Send + Sync {
    fn put(&self, id: String, record: ScoreRecord) -> Result<(), StoreError>;

    fn record(&self, id: &str) -> Result<ScoreRecord, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn get(&self, id: &str) -> Result<u64, StoreError> {
        self.record(id).map(|record| record.points)
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, ScoreRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReceiptStore for InMemoryStore {
    fn put(&self, id: String, record: ScoreRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(id, record);
        Ok(())
    }

    fn record(&self, id: &str) -> Result<ScoreRecord, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get(&self, id: &str) -> Result<u64, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        records
            .get(id)
            .map(|record| record.points)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;
    use std::sync::Arc;
    use std::thread;

    fn record(points: u64) -> ScoreRecord {
        ScoreRecord {
            points,
            receipt: Receipt {
                retailer: "Walgreens".to_string(),
                purchase_date: "2022-01-02".to_string(),
                purchase_time: "08:13".to_string(),
                items: vec![Item::new("Pepsi - 12-oz", "1.25")],
                total: "1.25".to_string(),
            },
        }
    }

    #[test]
    fn test_put_and_get() {
        let store = InMemoryStore::new();
        store.put("abc".to_string(), record(42)).unwrap();

        assert_eq!(store.get("abc"), Ok(42));
        assert_eq!(store.record("abc").unwrap().receipt.retailer, "Walgreens");
        assert_eq!(store.len(), Ok(1));
    }

    #[test]
    fn test_missing_id() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.get("does-not-exist"),
            Err(StoreError::NotFound("does-not-exist".to_string()))
        );
        assert_eq!(store.is_empty(), Ok(true));
    }

    #[test]
    fn test_get_matches_record_points() {
        let store = InMemoryStore::new();
        store.put("abc".to_string(), record(7)).unwrap();
        store.put("def".to_string(), record(9)).unwrap();

        assert_eq!(store.get("abc"), Ok(store.record("abc").unwrap().points));
        assert_eq!(store.get("def"), Ok(9));
        assert_eq!(store.get("ghi"), Err(StoreError::NotFound("ghi".to_string())));
    }

    #[test]
    fn test_concurrent_puts() {
        let store = Arc::new(InMemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50 {
                        store.put(format!("{}-{}", n, i), record(i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), Ok(400));
        assert_eq!(store.get("7-49"), Ok(49));
    }
}
