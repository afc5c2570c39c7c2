use crate::api::responses::{HealthResponse, RootResponse};
use axum::Json;
use chrono::Utc;

/// GET /api
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Dashboard Cache API".into(),
    })
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Utc::now(),
    })
}
