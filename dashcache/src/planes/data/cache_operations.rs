use crate::domain::{CacheEntry, CacheKey, CacheSummary, SUMMARY_LIMIT};
use crate::planes::data::operation::CacheOperations;
use crate::ports::CacheStore;
use async_trait::async_trait;
use serde_json::Value;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Application service that orchestrates cache operations
/// This is the main entry point for all cache operations in the application core
#[derive(Clone)]
pub struct CacheOperationsService {
    pub(crate) store: Arc<dyn CacheStore>,
}

impl CacheOperationsService {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Flush and release the underlying store
    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}

impl std::fmt::Debug for CacheOperationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheOperationsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheOperations for CacheOperationsService {
    /// Upsert the payload for a key; never retried on failure
    async fn put(
        &self,
        resource_type: &str,
        resource_id: &str,
        data: Value,
    ) -> Result<CacheEntry> {
        let key = CacheKey::new(resource_type, resource_id)?;

        match self.store.put(&key, data).await {
            Ok(entry) => {
                info!("Cached {}", key);
                Ok(entry)
            }
            Err(e) => {
                error!("Error caching {}: {}", key, e);
                Err(e)
            }
        }
    }

    async fn get(&self, resource_type: &str, resource_id: &str) -> Result<CacheEntry> {
        let key = CacheKey::new(resource_type, resource_id)?;

        match self.store.get(&key).await {
            Ok(Some(entry)) => Ok(entry),
            Ok(None) => {
                debug!("Cache miss for {}", key);
                Err(Error::NotFound)
            }
            Err(e) => {
                error!("Error getting cached {}: {}", key, e);
                Err(e)
            }
        }
    }

    async fn list_summaries(&self) -> Result<Vec<CacheSummary>> {
        self.store
            .list_summaries(SUMMARY_LIMIT)
            .await
            .inspect_err(|e| error!("Error listing cache summaries: {}", e))
    }
}
