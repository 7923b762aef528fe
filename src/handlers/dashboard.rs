use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::{db, error::AppResult, AppState};

/// Placeholder weekly-movement series shown on the dashboard. Static by
/// design: the store keeps no movement history to derive it from.
const WEEKLY_MOVEMENT: [(&str, i64); 7] = [
    ("Mon", 10),
    ("Tue", 7),
    ("Wed", 12),
    ("Thu", 5),
    ("Fri", 9),
    ("Sat", 6),
    ("Sun", 8),
];

#[derive(Debug, Serialize)]
struct MovementEntry {
    day: &'static str,
    moved: i64,
}

fn weekly_movement() -> Vec<MovementEntry> {
    WEEKLY_MOVEMENT
        .iter()
        .map(|&(day, moved)| MovementEntry { day, moved })
        .collect()
}

/// `GET /dashboard_data` — full stock list, the five lowest-stock items
/// (stable sort ascending by quantity, top 5), and the fixed weekly series.
pub async fn dashboard_data(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let stock = db::fetch_stock(&state.db).await?;
    let low_stock = db::fetch_low_stock(&state.db).await?;

    info!(
        stock = stock.len(),
        low_stock = low_stock.len(),
        "Built dashboard summary"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "stock": stock,
            "low_stock": low_stock,
            "weekly_movement": weekly_movement(),
        })),
    ))
}
