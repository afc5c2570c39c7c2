use async_trait::async_trait;
use shared::Result;

/// Operator-only maintenance, kept apart from the request-path operations
#[async_trait]
pub trait MaintenanceOperations: Send + Sync + 'static {
    /// Irreversibly delete every cache entry, returning the count removed
    async fn clear_all(&self) -> Result<u64>;
}
