use crate::domain::{STATUS_CHECK_LIMIT, StatusCheck};
use crate::ports::StatusCheckStore;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Records client liveness pings
#[derive(Clone)]
pub struct StatusCheckService {
    store: Arc<dyn StatusCheckStore>,
}

impl StatusCheckService {
    pub fn new(store: Arc<dyn StatusCheckStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, client_name: &str) -> Result<StatusCheck> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(Error::InvalidInput("client_name must not be empty".into()));
        }

        let check = self.store.record(StatusCheck::new(client_name)).await?;
        info!("Status check from {}", check.client_name);
        Ok(check)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>> {
        self.store.list(STATUS_CHECK_LIMIT).await
    }
}
