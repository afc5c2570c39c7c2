use crate::domain::{CacheEntry, CacheKey, CacheSummary, StatusCheck};
use crate::ports::{CacheStore, StatusCheckStore};
use async_trait::async_trait;
use serde_json::Value;
use shared::{Error, Result};
use std::path::Path;

const ENTRIES_TREE: &str = "cache";
const STATUS_CHECKS_TREE: &str = "status_checks";

/// Sled-backed document store for cache entries and status checks
#[derive(Clone)]
pub struct SledCacheStore {
    db: sled::Db,
    entries: sled::Tree,
    status_checks: sled::Tree,
}

impl SledCacheStore {
    /// Open (or create) the database at `path`
    /// Creates the parent directory if it doesn't exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open Sled database: {}", e)))?;

        let entries = db
            .open_tree(ENTRIES_TREE)
            .map_err(|e| Error::Storage(format!("Failed to open cache tree: {}", e)))?;
        let status_checks = db
            .open_tree(STATUS_CHECKS_TREE)
            .map_err(|e| Error::Storage(format!("Failed to open status tree: {}", e)))?;

        Ok(Self {
            db,
            entries,
            status_checks,
        })
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| Error::Storage(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for SledCacheStore {
    async fn put(&self, key: &CacheKey, data: Value) -> Result<CacheEntry> {
        let entry = CacheEntry::new(key, data);
        let value = serde_json::to_vec(&entry)
            .map_err(|e| Error::Serialization(format!("Failed to serialize entry: {}", e)))?;

        // A single-key insert replaces the whole document atomically
        self.entries
            .insert(key.storage_key(), value)
            .map_err(|e| Error::Storage(format!("Failed to save entry: {}", e)))?;

        self.flush()?;

        Ok(entry)
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let value = self
            .entries
            .get(key.storage_key())
            .map_err(|e| Error::Storage(format!("Failed to get entry: {}", e)))?;

        match value {
            Some(bytes) => {
                let entry: CacheEntry = serde_json::from_slice(&bytes).map_err(|e| {
                    Error::Serialization(format!("Failed to deserialize entry: {}", e))
                })?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    async fn list_summaries(&self, limit: usize) -> Result<Vec<CacheSummary>> {
        let mut summaries = Vec::new();

        for result in self.entries.iter().values().take(limit) {
            let value = result
                .map_err(|e| Error::Storage(format!("Failed to iterate database: {}", e)))?;

            let summary: CacheSummary = serde_json::from_slice(&value).map_err(|e| {
                Error::Serialization(format!("Failed to deserialize entry: {}", e))
            })?;

            summaries.push(summary);
        }

        Ok(summaries)
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut removed = 0;

        for result in self.entries.iter().keys() {
            let key = result
                .map_err(|e| Error::Storage(format!("Failed to iterate database: {}", e)))?;

            // Only count keys this call actually removed
            if self
                .entries
                .remove(&key)
                .map_err(|e| Error::Storage(format!("Failed to delete entry: {}", e)))?
                .is_some()
            {
                removed += 1;
            }
        }

        self.flush()?;

        Ok(removed)
    }

    async fn close(&self) -> Result<()> {
        self.flush()
    }
}

#[async_trait]
impl StatusCheckStore for SledCacheStore {
    async fn record(&self, check: StatusCheck) -> Result<StatusCheck> {
        // Monotonic ids keep the tree in insertion order
        let id = self
            .db
            .generate_id()
            .map_err(|e| Error::Storage(format!("Failed to generate id: {}", e)))?;

        let value = serde_json::to_vec(&check).map_err(|e| {
            Error::Serialization(format!("Failed to serialize status check: {}", e))
        })?;

        self.status_checks
            .insert(id.to_be_bytes(), value)
            .map_err(|e| Error::Storage(format!("Failed to save status check: {}", e)))?;

        self.flush()?;

        Ok(check)
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let mut checks = Vec::new();

        for result in self.status_checks.iter().values().take(limit) {
            let value = result
                .map_err(|e| Error::Storage(format!("Failed to iterate database: {}", e)))?;

            let check: StatusCheck = serde_json::from_slice(&value).map_err(|e| {
                Error::Serialization(format!("Failed to deserialize status check: {}", e))
            })?;

            checks.push(check);
        }

        Ok(checks)
    }
}
