use crate::domain::{CacheEntry, CacheKey, CacheSummary, StatusCheck};
use crate::ports::{CacheStore, StatusCheckStore};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use shared::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Non-durable store used when the sled database cannot be opened.
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryCacheStore {
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
    status_checks: Arc<RwLock<Vec<StatusCheck>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn put(&self, key: &CacheKey, data: Value) -> Result<CacheEntry> {
        let entry = CacheEntry::new(key, data);
        // insert holds the shard lock, so same-key writers are serialized
        self.entries.insert(key.clone(), entry.clone());
        Ok(entry)
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn list_summaries(&self, limit: usize) -> Result<Vec<CacheSummary>> {
        let mut keyed: Vec<(Vec<u8>, CacheSummary)> = self
            .entries
            .iter()
            .map(|item| (item.key().storage_key(), item.value().summary()))
            .collect();

        // Same order the sled store yields
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(keyed
            .into_iter()
            .take(limit)
            .map(|(_, summary)| summary)
            .collect())
    }

    async fn clear_all(&self) -> Result<u64> {
        let keys: Vec<CacheKey> = self.entries.iter().map(|item| item.key().clone()).collect();

        let removed = keys
            .iter()
            .filter(|key| self.entries.remove(*key).is_some())
            .count();

        Ok(removed as u64)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl StatusCheckStore for MemoryCacheStore {
    async fn record(&self, check: StatusCheck) -> Result<StatusCheck> {
        self.status_checks.write().await.push(check.clone());
        Ok(check)
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let checks = self.status_checks.read().await;
        Ok(checks.iter().take(limit).cloned().collect())
    }
}
