pub mod cache_operations;
pub mod operation;
pub mod status_checks;

pub use cache_operations::CacheOperationsService;
pub use status_checks::StatusCheckService;
