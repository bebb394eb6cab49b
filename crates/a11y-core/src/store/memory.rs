//! In-process result store

use super::ResultStore;
use crate::model::StoredScanRecord;
use crate::CoreResult;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Result store held in memory; contents are lost on restart
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredScanRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn save(&self, url: &str, json_response: &str) -> CoreResult<StoredScanRecord> {
        let mut records = self.records.write().await;
        let record = StoredScanRecord {
            id: records.len() as i64 + 1,
            timestamp: Utc::now(),
            url: url.to_string(),
            json_response: json_response.to_string(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn latest(&self) -> CoreResult<Option<StoredScanRecord>> {
        Ok(self.records.read().await.last().cloned())
    }

    async fn recent(&self, limit: usize, offset: usize) -> CoreResult<Vec<StoredScanRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> CoreResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
