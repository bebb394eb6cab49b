//! Persistence gateway
//!
//! Stores serialized scan payloads as opaque text next to the URL they came
//! from. The store never inspects the payload; readers decide how to
//! interpret it.

pub mod memory;

pub use memory::MemoryStore;

use crate::model::{ResultBundle, StoredScanRecord};
use crate::{CoreError, CoreResult};
use async_trait::async_trait;

/// Append-only store of scan records
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist one payload, assigning id and timestamp
    async fn save(&self, url: &str, json_response: &str) -> CoreResult<StoredScanRecord>;

    /// Most recently stored record
    async fn latest(&self) -> CoreResult<Option<StoredScanRecord>>;

    /// Records most-recent-first
    async fn recent(&self, limit: usize, offset: usize) -> CoreResult<Vec<StoredScanRecord>>;

    /// Total number of records
    async fn count(&self) -> CoreResult<u64>;
}

/// Serialize a bundle and persist it under `url`
pub async fn save_bundle(
    store: &dyn ResultStore,
    bundle: &ResultBundle,
    url: &str,
) -> CoreResult<StoredScanRecord> {
    let json = bundle.to_json().map_err(CoreError::Serialization)?;
    store.save(url, &json).await
}

