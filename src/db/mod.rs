use sqlx::SqlitePool;
use tracing::debug;

use crate::error::AppResult;
use crate::models::*;

/// Idempotent schema creation, run once at process start.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            rfid TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

// ── Items ─────────────────────────────────────────────────────────────────────

/// Insert a batch of items inside a single transaction. `quantity` defaults
/// to 1 when absent. The batch is atomic: an error on any row rolls back the
/// whole batch. Returns the number of rows inserted.
pub async fn insert_items(pool: &SqlitePool, items: &[NewItem]) -> AppResult<u64> {
    let mut tx = pool.begin().await?;

    for item in items {
        sqlx::query("INSERT INTO items (name, rfid, quantity) VALUES (?, ?, ?)")
            .bind(&item.name)
            .bind(&item.rfid)
            .bind(item.quantity.unwrap_or(1))
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(items.len() as u64)
}

/// All items in natural insertion order. No filtering, no pagination.
pub async fn fetch_all_items(pool: &SqlitePool) -> AppResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT id, name, rfid, quantity FROM items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Set the quantity of the row matching `id`. A missing id is not an error:
/// zero rows affected is reported back but still a success. Callers that want
/// stricter semantics can inspect the returned count.
pub async fn update_quantity(pool: &SqlitePool, id: i64, quantity: i64) -> AppResult<u64> {
    let result = sqlx::query("UPDATE items SET quantity = ? WHERE id = ?")
        .bind(quantity)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        debug!(id, "update_quantity matched no rows");
    }
    Ok(result.rows_affected())
}

/// Delete the row matching `id`. Same weak contract as [`update_quantity`]:
/// a missing id is a silent no-op success.
pub async fn delete_item(pool: &SqlitePool, id: i64) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        debug!(id, "delete_item matched no rows");
    }
    Ok(result.rows_affected())
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// Full `(name, quantity)` stock list in natural insertion order.
pub async fn fetch_stock(pool: &SqlitePool) -> AppResult<Vec<StockEntry>> {
    let stock = sqlx::query_as::<_, StockEntry>(
        "SELECT name, quantity FROM items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(stock)
}

/// The `min(5, total)` items with the smallest quantities: stable sort
/// ascending by quantity, ties broken by insertion order (`id`), top 5.
pub async fn fetch_low_stock(pool: &SqlitePool) -> AppResult<Vec<StockEntry>> {
    let low = sqlx::query_as::<_, StockEntry>(
        "SELECT name, quantity FROM items ORDER BY quantity ASC, id ASC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    Ok(low)
}
