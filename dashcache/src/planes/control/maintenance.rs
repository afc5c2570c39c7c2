use crate::planes::control::operation::MaintenanceOperations;
use crate::planes::data::CacheOperationsService;
use async_trait::async_trait;
use shared::Result;
use tracing::{error, warn};

#[async_trait]
impl MaintenanceOperations for CacheOperationsService {
    async fn clear_all(&self) -> Result<u64> {
        match self.store.clear_all().await {
            Ok(removed) => {
                warn!("Cleared {} cached items", removed);
                Ok(removed)
            }
            Err(e) => {
                error!("Error clearing cache: {}", e);
                Err(e)
            }
        }
    }
}
