use crate::domain::{CacheEntry, CacheKey, CacheSummary, StatusCheck};
use async_trait::async_trait;
use serde_json::Value;
use shared::Result;

// Ports are the pluggable extension points for the underlying document store

/// Port for keyed cache entry storage.
///
/// Implementations must make `put` an atomic upsert on the key and must keep
/// a miss (`Ok(None)`) distinguishable from a storage fault (`Err`).
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Insert or fully replace the entry for `key`, stamping `cached_at`
    async fn put(&self, key: &CacheKey, data: Value) -> Result<CacheEntry>;

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    /// Summaries in key order, at most `limit` of them
    async fn list_summaries(&self, limit: usize) -> Result<Vec<CacheSummary>>;

    /// Remove every entry, returning how many were removed
    async fn clear_all(&self) -> Result<u64>;

    /// Flush outstanding writes before the store is dropped
    async fn close(&self) -> Result<()>;
}

/// Port for the status check log
#[async_trait]
pub trait StatusCheckStore: Send + Sync + 'static {
    async fn record(&self, check: StatusCheck) -> Result<StatusCheck>;

    /// Oldest first, at most `limit` of them
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>>;
}
