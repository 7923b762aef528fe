use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::config::Config;

/// Shared application state — cheap to clone (pool is an Arc internally).
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rfid_inventory=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("RFID Inventory Service — Rust + Axum");

    info!(url = %config.database_url, "Opening SQLite database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // Idempotent: safe to run on every start
    db::init_schema(&pool).await?;
    info!("Schema ready.");

    let state = AppState { db: pool };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))

        // ── Items CRUD ──────────────────────────────────────────────────────
        .route("/items", get(handlers::items::list_items))
        .route("/add_item", post(handlers::items::add_items))
        .route("/update_item/:id", put(handlers::items::update_item))
        .route("/delete_item/:id", delete(handlers::items::delete_item))

        // ── Dashboard ───────────────────────────────────────────────────────
        .route("/dashboard_data", get(handlers::dashboard::dashboard_data))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
