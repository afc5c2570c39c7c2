use crate::api::requests::{
    DriveFolderListing, DriveFolderQuery, PutCacheRequest, SheetQuery, SheetRows,
};
use crate::api::responses::{CacheStatusResponse, GetResponse, PutResponse};
use crate::api::ApiError;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use dashcache::domain::{DRIVE_FOLDER_RESOURCE, SHEET_RESOURCE};
use dashcache::planes::data::operation::CacheOperations;
use serde_json::Value;
use shared::Error;
use tracing::info;

/// Types whose GET path is shadowed by the sheet and drive routes
const ROUTED_RESOURCE_TYPES: [&str; 2] = ["sheets", "drive"];

async fn store_entry(
    state: &AppState,
    resource_type: &str,
    resource_id: &str,
    data: Value,
    context: &str,
    message: &str,
) -> Result<Json<PutResponse>, ApiError> {
    let entry = state
        .cache_operations
        .put(resource_type, resource_id, data)
        .await
        .map_err(|e| ApiError::from_error(context, e))?;

    Ok(Json(PutResponse::new(message, &entry)))
}

async fn load_entry(
    state: &AppState,
    resource_type: &str,
    resource_id: &str,
) -> Result<Json<GetResponse>, ApiError> {
    let entry = state
        .cache_operations
        .get(resource_type, resource_id)
        .await
        .map_err(|e| ApiError::from_error("Failed to get cached data", e))?;

    Ok(Json(entry.into()))
}

/// POST /api/cache
pub async fn put_entry(
    State(state): State<AppState>,
    payload: Result<Json<PutCacheRequest>, JsonRejection>,
) -> Result<Json<PutResponse>, ApiError> {
    let Json(req) = payload?;
    info!("PUT: type={}, id={}", req.resource_type, req.resource_id);

    if ROUTED_RESOURCE_TYPES.contains(&req.resource_type.trim()) {
        return Err(ApiError::from_error(
            "Failed to cache data",
            Error::InvalidKey {
                field: "resource_type",
                reason: "is reserved by the sheet and drive routes",
            },
        ));
    }

    store_entry(
        &state,
        &req.resource_type,
        &req.resource_id,
        req.data,
        "Failed to cache data",
        "Data cached successfully",
    )
    .await
}

/// GET /api/cache/{resource_type}/{resource_id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path((resource_type, resource_id)): Path<(String, String)>,
) -> Result<Json<GetResponse>, ApiError> {
    info!("GET: type={}, id={}", resource_type, resource_id);

    load_entry(&state, &resource_type, &resource_id).await
}

/// POST /api/cache/sheets?sheet_name=...
pub async fn put_sheet(
    State(state): State<AppState>,
    query: Result<Query<SheetQuery>, QueryRejection>,
    payload: Result<Json<SheetRows>, JsonRejection>,
) -> Result<Json<PutResponse>, ApiError> {
    let Query(query) = query?;
    let Json(rows) = payload?;
    info!("PUT sheet: {} ({} rows)", query.sheet_name, rows.len());

    let data = Value::Array(rows.into_iter().map(Value::Object).collect());

    store_entry(
        &state,
        SHEET_RESOURCE,
        &query.sheet_name,
        data,
        "Failed to cache sheet data",
        "Sheet data cached successfully",
    )
    .await
}

/// GET /api/cache/sheets/{sheet_name}
pub async fn get_sheet(
    State(state): State<AppState>,
    Path(sheet_name): Path<String>,
) -> Result<Json<GetResponse>, ApiError> {
    info!("GET sheet: {}", sheet_name);

    load_entry(&state, SHEET_RESOURCE, &sheet_name).await
}

/// POST /api/cache/drive?folder_id=...
pub async fn put_drive_folder(
    State(state): State<AppState>,
    query: Result<Query<DriveFolderQuery>, QueryRejection>,
    payload: Result<Json<DriveFolderListing>, JsonRejection>,
) -> Result<Json<PutResponse>, ApiError> {
    let Query(query) = query?;
    let Json(listing) = payload?;
    info!("PUT drive folder: {}", query.folder_id);

    store_entry(
        &state,
        DRIVE_FOLDER_RESOURCE,
        &query.folder_id,
        Value::Object(listing),
        "Failed to cache drive data",
        "Drive data cached successfully",
    )
    .await
}

/// GET /api/cache/drive/folder/{folder_id}
pub async fn get_drive_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<GetResponse>, ApiError> {
    info!("GET drive folder: {}", folder_id);

    load_entry(&state, DRIVE_FOLDER_RESOURCE, &folder_id).await
}

/// GET /api/cache/status
pub async fn cache_status(
    State(state): State<AppState>,
) -> Result<Json<CacheStatusResponse>, ApiError> {
    info!("CACHE_STATUS");

    let summaries = state
        .cache_operations
        .list_summaries()
        .await
        .map_err(|e| ApiError::from_error("Failed to get cache status", e))?;

    Ok(Json(summaries.into()))
}
