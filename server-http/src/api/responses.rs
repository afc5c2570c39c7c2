use chrono::{DateTime, Utc};
use dashcache::{CacheEntry, CacheSummary};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

// === Cache Operation Models ===

#[derive(Debug, Serialize)]
pub struct PutResponse {
    pub success: bool,
    pub message: String,
    pub cached_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl PutResponse {
    pub fn new(message: impl Into<String>, entry: &CacheEntry) -> Self {
        Self {
            success: true,
            message: message.into(),
            cached_at: entry.cached_at,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetResponse {
    pub success: bool,
    pub data: Value,
    pub cached_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl From<CacheEntry> for GetResponse {
    fn from(entry: CacheEntry) -> Self {
        Self {
            success: true,
            data: entry.data,
            cached_at: entry.cached_at,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CacheStatusResponse {
    pub success: bool,
    pub cached_items: Vec<CacheSummary>,
    pub total_cached: usize,
    pub timestamp: DateTime<Utc>,
}

impl From<Vec<CacheSummary>> for CacheStatusResponse {
    fn from(cached_items: Vec<CacheSummary>) -> Self {
        Self {
            success: true,
            total_cached: cached_items.len(),
            cached_items,
            timestamp: Utc::now(),
        }
    }
}

// === Admin Operation Models ===

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub removed: u64,
    pub timestamp: DateTime<Utc>,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            detail,
        }
    }
}
