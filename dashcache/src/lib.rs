pub mod domain;
pub mod persistence;
pub mod planes;
pub mod ports;

pub use domain::{CacheEntry, CacheKey, CacheSummary, StatusCheck};
pub use persistence::{MemoryCacheStore, SledCacheStore};
pub use planes::data::{CacheOperationsService, StatusCheckService};
