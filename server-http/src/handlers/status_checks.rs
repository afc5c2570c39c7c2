use crate::api::requests::CreateStatusCheckRequest;
use crate::api::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use dashcache::StatusCheck;

/// POST /api/status
pub async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<CreateStatusCheckRequest>, JsonRejection>,
) -> Result<Json<StatusCheck>, ApiError> {
    let Json(req) = payload?;

    state
        .status_checks
        .record(&req.client_name)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_error("Failed to record status check", e))
}

/// GET /api/status
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    state
        .status_checks
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_error("Failed to list status checks", e))
}
