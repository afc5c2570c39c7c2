pub mod browser;
pub mod maintenance;
pub mod operation;

pub use browser::{BrowserCacheArtifacts, DEFAULT_INDEXED_DB_NAME};
pub use operation::MaintenanceOperations;
