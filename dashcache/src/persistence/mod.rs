pub mod memory_store;
pub mod sled_store;

pub use memory_store::MemoryCacheStore;
pub use sled_store::SledCacheStore;
