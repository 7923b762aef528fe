use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    db,
    error::{AppError, AppResult},
    models::{ItemBatch, UpdateQuantity},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

/// `GET /items` — every row, as a bare JSON array.
pub async fn list_items(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<crate::models::Item>>)> {
    let items = db::fetch_all_items(&state.db).await?;

    info!(count = items.len(), "Listed items");

    Ok((StatusCode::OK, Json(items)))
}

// ── Create ────────────────────────────────────────────────────────────────────

/// `POST /add_item` — accepts a single item object or an array of them.
/// A missing `name` or `rfid` anywhere in the payload fails the whole batch.
pub async fn add_items(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let items = serde_json::from_value::<ItemBatch>(body)
        .map_err(|_| {
            AppError::Validation(
                "each item must be an object with string fields `name` and `rfid` \
                 and an optional integer `quantity`"
                    .to_string(),
            )
        })?
        .into_vec();

    for item in &items {
        if item.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if item.rfid.trim().is_empty() {
            return Err(AppError::Validation("rfid must not be empty".to_string()));
        }
    }

    let count = db::insert_items(&state.db, &items).await?;

    info!(count, "Added items");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("{} item(s) added successfully", count),
        })),
    ))
}

// ── Update quantity ───────────────────────────────────────────────────────────

/// `PUT /update_item/{id}` — sets the quantity for one row. A missing id is
/// reported as success with zero rows changed, matching the delete contract.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuantity>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let affected = db::update_quantity(&state.db, id, payload.quantity).await?;

    info!(id, quantity = payload.quantity, affected, "Updated item");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("Item {} updated successfully", id),
        })),
    ))
}

// ── Delete ────────────────────────────────────────────────────────────────────

/// `DELETE /delete_item/{id}` — removes one row; missing ids are a no-op.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let affected = db::delete_item(&state.db, id).await?;

    info!(id, affected, "Deleted item");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("Item {} deleted successfully", id),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::{build_router, db, models::Item, AppState};

    async fn test_app() -> Router {
        let pool = db::tests::test_pool().await;
        build_router(AppState { db: pool })
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn add_single_item_then_list() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"{"name":"Widget","rfid":"A1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "1 item(s) added successfully");

        let response = app.oneshot(get("/items")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].rfid, "A1");
        assert_eq!(items[0].quantity, 1);
    }

    #[tokio::test]
    async fn add_batch_reports_count() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"[{"name":"A","rfid":"T1"},{"name":"B","rfid":"T2","quantity":4},{"name":"C","rfid":"T3"}]"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "3 item(s) added successfully");

        let response = app.oneshot(get("/items")).await.unwrap();
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].quantity, 4);
    }

    #[tokio::test]
    async fn add_item_missing_rfid_is_rejected() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/add_item", r#"{"name":"Widget"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("rfid"));

        // nothing was inserted
        let response = app.oneshot(get("/items")).await.unwrap();
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn add_batch_with_one_bad_item_inserts_nothing() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"[{"name":"A","rfid":"T1"},{"rfid":"T2"}]"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(get("/items")).await.unwrap();
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"{"name":"   ","rfid":"A1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_quantity_round_trip() {
        let app = test_app().await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"{"name":"Widget","rfid":"A1","quantity":5}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request("PUT", "/update_item/1", r#"{"quantity":99}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Item 1 updated successfully");

        let response = app.oneshot(get("/items")).await.unwrap();
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(items[0].quantity, 99);
    }

    #[tokio::test]
    async fn update_missing_id_still_succeeds() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request("PUT", "/update_item/42", r#"{"quantity":1}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Item 42 updated successfully");
    }

    #[tokio::test]
    async fn delete_round_trip_and_missing_id() {
        let app = test_app().await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/add_item",
                r#"[{"name":"A","rfid":"T1"},{"name":"B","rfid":"T2"}]"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/delete_item/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Item 1 deleted successfully");

        let response = app.clone().oneshot(get("/items")).await.unwrap();
        let items: Vec<Item> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);

        // deleting again is a silent no-op success
        let response = app
            .oneshot(json_request("DELETE", "/delete_item/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_body_is_rejected() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request("POST", "/add_item", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = test_app().await;

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
