use dashcache::ports::{CacheStore, StatusCheckStore};
use dashcache::{CacheOperationsService, MemoryCacheStore, SledCacheStore, StatusCheckService};
use shared::config::Config;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache_operations: Arc<CacheOperationsService>,
    pub status_checks: Arc<StatusCheckService>,
}

impl AppState {
    /// Open the sled store under the configured data directory
    pub fn open(config: &Config) -> Self {
        // Try to initialize with persistence, fall back to in-memory if it fails
        match SledCacheStore::open(config.cache_db_path()) {
            Ok(store) => {
                tracing::info!(
                    "Cache store opened at {}",
                    config.cache_db_path().display()
                );
                Self::from_store(store)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize persistence: {}. Running in-memory mode.",
                    e
                );
                Self::from_store(MemoryCacheStore::new())
            }
        }
    }

    pub fn from_store<S>(store: S) -> Self
    where
        S: CacheStore + StatusCheckStore,
    {
        let store = Arc::new(store);

        Self {
            cache_operations: Arc::new(CacheOperationsService::new(store.clone())),
            status_checks: Arc::new(StatusCheckService::new(store)),
        }
    }

    /// Flush the store; called once the server has stopped accepting requests
    pub async fn close(&self) -> shared::Result<()> {
        self.cache_operations.close().await
    }
}
