//! In-memory storage for development and testing.

use async_trait::async_trait;
use bacheo_core::error::{BacheoError, Result};
use bacheo_core::models::{BacheId, BacheRecord, ListFilter};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ports::BacheStore;

type RecordMap = HashMap<BacheId, BacheRecord>;

/// In-memory implementation of BacheStore
#[derive(Debug, Clone, Default)]
pub struct MemoryBacheStore {
    records: Arc<RwLock<RecordMap>>,
}

impl MemoryBacheStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = BacheRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id, r)).collect();
        Self { records: Arc::new(RwLock::new(map)) }
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RecordMap>> {
        self.records.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RecordMap>> {
        self.records.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> BacheoError {
    BacheoError::Storage { reason: "record lock poisoned".to_string() }
}

#[async_trait]
impl BacheStore for MemoryBacheStore {
    async fn insert(&self, record: &BacheRecord) -> Result<()> {
        let mut records = self.write()?;
        if records.contains_key(&record.id) {
            return Err(BacheoError::Storage {
                reason: format!("Record {} already exists", record.id),
            });
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: BacheId) -> Result<Option<BacheRecord>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn update(&self, record: &BacheRecord) -> Result<()> {
        let mut records = self.write()?;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(BacheoError::BacheNotFound { id: record.id.to_string() }),
        }
    }

    async fn delete(&self, id: BacheId) -> Result<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<BacheRecord>> {
        let records = self.read()?;
        let mut matching: Vec<BacheRecord> =
            records.values().filter(|r| filter.matches(r)).cloned().collect();
        matching.sort_by(|a, b| a.no_bache.cmp(&b.no_bache).then(a.created_at.cmp(&b.created_at)));
        Ok(matching)
    }

    async fn max_no_bache(&self, street_key: &str) -> Result<Option<u32>> {
        let records = self.read()?;
        Ok(records
            .values()
            .filter(|r| r.street.street_key() == street_key)
            .map(|r| r.no_bache)
            .max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacheo_core::models::{BacheShape, GeoPoint, StreetMeta};
    use chrono::Utc;

    fn record(calle: &str, no: u32, residente: Option<&str>) -> BacheRecord {
        BacheRecord::new(
            StreetMeta::new(calle, vec![]),
            BacheShape::from_text("3\n2\n2").unwrap(),
            None,
            GeoPoint::new(19.43, -99.13),
            residente.map(String::from),
            no,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryBacheStore::new();
        let rec = record("Juárez", 1, None);

        store.insert(&rec).await.unwrap();
        let loaded = store.get(rec.id).await.unwrap().unwrap();
        assert_eq!(loaded, rec);

        assert!(store.insert(&rec).await.is_err());
        assert!(store.get(BacheId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryBacheStore::new();
        let rec = record("Juárez", 1, None);
        let err = store.update(&rec).await.unwrap_err();
        assert!(matches!(err, BacheoError::BacheNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filtered() {
        let store = MemoryBacheStore::with_records(vec![
            record("A", 3, Some("u1")),
            record("A", 1, Some("u2")),
            record("B", 2, Some("u1")),
        ]);

        let all = store.list(&ListFilter::default()).await.unwrap();
        let numbers: Vec<u32> = all.iter().map(|r| r.no_bache).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let mine = store.list(&ListFilter::by_residente("u1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.residente_uid.as_deref() == Some("u1")));
    }

    #[tokio::test]
    async fn test_max_no_bache_by_street() {
        let store = MemoryBacheStore::with_records(vec![
            record("Av. Juárez", 4, None),
            record("  AV. JUÁREZ ", 7, None),
            record("Madero", 9, None),
        ]);

        assert_eq!(store.max_no_bache("av. juárez").await.unwrap(), Some(7));
        assert_eq!(store.max_no_bache("bolívar").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryBacheStore::new();
        let rec = record("Juárez", 1, None);
        store.insert(&rec).await.unwrap();

        assert!(store.delete(rec.id).await.unwrap());
        assert!(!store.delete(rec.id).await.unwrap());
        assert!(store.is_empty().unwrap());
    }
}
