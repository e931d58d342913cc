//! Gift item entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::gift_item::{GiftItem, GiftItemStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for gift item status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gift_item_status", rename_all = "lowercase")]
pub enum GiftItemStatusDb {
    Active,
    Archived,
}

impl From<GiftItemStatusDb> for GiftItemStatus {
    fn from(s: GiftItemStatusDb) -> Self {
        match s {
            GiftItemStatusDb::Active => GiftItemStatus::Active,
            GiftItemStatusDb::Archived => GiftItemStatus::Archived,
        }
    }
}

impl From<GiftItemStatus> for GiftItemStatusDb {
    fn from(s: GiftItemStatus) -> Self {
        match s {
            GiftItemStatus::Active => GiftItemStatusDb::Active,
            GiftItemStatus::Archived => GiftItemStatusDb::Archived,
        }
    }
}

/// Database row mapping for the gift_items table.
///
/// The `claimed` column carries a table-level CHECK mirroring the ledger
/// invariant; repository transactions keep it from ever firing.
#[derive(Debug, Clone, FromRow)]
pub struct GiftItemEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub status: GiftItemStatusDb,
    pub quantity: i32,
    pub claimed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GiftItemEntity> for GiftItem {
    fn from(entity: GiftItemEntity) -> Self {
        GiftItem {
            id: entity.id,
            list_id: entity.list_id,
            name: entity.name,
            url: entity.url,
            price: entity.price,
            status: entity.status.into(),
            quantity: entity.quantity,
            claimed: entity.claimed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
