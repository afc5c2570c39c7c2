use crate::api::responses::ClearCacheResponse;
use crate::api::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use dashcache::planes::control::MaintenanceOperations;
use tracing::warn;

/// DELETE /api/admin/cache
///
/// Only mounted when an operator token is configured.
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    warn!("CLEAR_CACHE requested by operator");

    let removed = state
        .cache_operations
        .clear_all()
        .await
        .map_err(|e| ApiError::from_error("Failed to clear cache", e))?;

    Ok(Json(ClearCacheResponse {
        success: true,
        removed,
        timestamp: Utc::now(),
    }))
}
