use serde::Deserialize;
use serde_json::{Map, Value};

// === Cache Operation Models ===

#[derive(Debug, Deserialize)]
pub struct PutCacheRequest {
    pub resource_type: String,
    pub resource_id: String,
    pub data: Value,
}

/// Rows of one spreadsheet tab, as the frontend fetched them
pub type SheetRows = Vec<Map<String, Value>>;

/// Listing of one drive folder
pub type DriveFolderListing = Map<String, Value>;

#[derive(Debug, Deserialize)]
pub struct SheetQuery {
    pub sheet_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DriveFolderQuery {
    pub folder_id: String,
}

// === Status Check Models ===

#[derive(Debug, Deserialize)]
pub struct CreateStatusCheckRequest {
    pub client_name: String,
}
