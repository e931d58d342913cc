//! Gift item domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Informational item status tag. Not consulted by the claim ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftItemStatus {
    Active,
    Archived,
}

impl std::fmt::Display for GiftItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiftItemStatus::Active => write!(f, "active"),
            GiftItemStatus::Archived => write!(f, "archived"),
        }
    }
}

/// A gift item with its target quantity and running claimed count.
///
/// `claimed` is mutated exclusively through the claim ledger operations;
/// the invariant `0 <= claimed <= quantity` holds after every one of them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GiftItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: GiftItemStatus,
    pub quantity: i32,
    pub claimed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GiftItem {
    /// Remaining unclaimed units at this point in time.
    pub fn available(&self) -> i32 {
        (self.quantity - self.claimed).max(0)
    }
}

/// Request to add an item to a list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_product_url"))]
    pub url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub quantity: i32,
}

/// Partial update to an item. Quantity edits below the current claimed
/// count are rejected so the ledger stays the only writer of `claimed`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_product_url"))]
    pub url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Option<f64>,

    pub status: Option<GiftItemStatus>,

    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub quantity: Option<i32>,
}

/// Gift item response payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GiftItemResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: GiftItemStatus,
    pub quantity: i32,
    pub claimed: i32,
    pub available: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GiftItem> for GiftItemResponse {
    fn from(item: GiftItem) -> Self {
        let available = item.available();
        Self {
            id: item.id,
            list_id: item.list_id,
            name: item.name,
            url: item.url,
            price: item.price,
            status: item.status,
            quantity: item.quantity,
            claimed: item.claimed,
            available,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
