pub mod dashboard;
pub mod items;

use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn index() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "service": "rfid-inventory", "endpoints": ["/items", "/add_item", "/update_item/{id}", "/delete_item/{id}", "/dashboard_data"] })),
    )
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "rfid-inventory" })))
}
