use crate::domain::{CacheEntry, CacheSummary};
use async_trait::async_trait;
use serde_json::Value;
use shared::Result;

/// Application-level cache operations trait
/// Keys arrive as raw strings and are validated before reaching storage
#[async_trait]
pub trait CacheOperations: Send + Sync + 'static {
    async fn put(&self, resource_type: &str, resource_id: &str, data: Value)
    -> Result<CacheEntry>;

    /// Fails with `Error::NotFound` when nothing is cached for the key
    async fn get(&self, resource_type: &str, resource_id: &str) -> Result<CacheEntry>;

    async fn list_summaries(&self) -> Result<Vec<CacheSummary>>;
}
