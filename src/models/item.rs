use serde::{Deserialize, Serialize};

/// Core inventory entity, one row of the `items` table.
///
/// `id` is assigned by SQLite (`INTEGER PRIMARY KEY AUTOINCREMENT`), so it is
/// monotonic and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub rfid: String,
    pub quantity: i64,
}

/// One `(name, quantity)` pair of the dashboard stock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockEntry {
    pub name: String,
    pub quantity: i64,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub rfid: String,
    /// Defaults to 1 at insert time when omitted.
    pub quantity: Option<i64>,
}

/// `POST /add_item` accepts either a single item object or an array of them.
/// A bare object is normalized into a one-element batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemBatch {
    One(NewItem),
    Many(Vec<NewItem>),
}

impl ItemBatch {
    pub fn into_vec(self) -> Vec<NewItem> {
        match self {
            ItemBatch::One(item) => vec![item],
            ItemBatch::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: i64,
}
