//! Claim and purchase DTOs for the claim ledger endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Where a purchased gift should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTarget {
    /// Ship to the list owner / gift recipient.
    Recipient,
    /// Ship to the buyer, who hands the gift over in person.
    Purchaser,
}

impl std::fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryTarget::Recipient => write!(f, "recipient"),
            DeliveryTarget::Purchaser => write!(f, "purchaser"),
        }
    }
}

/// Request to directly override an item's claimed count.
///
/// Backs the "unmark as purchased" action. Any integer is accepted; the
/// ledger clamps it into `0..=quantity`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SetClaimRequest {
    pub claimed: i32,
}

/// Request to increment an item's claimed count.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddClaimRequest {
    #[validate(range(min = 0, message = "Increment must be non-negative"))]
    pub add: i32,
}

/// Result of a claim override or increment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClaimResponse {
    pub item_id: Uuid,
    pub quantity: i32,
    pub claimed: i32,
    /// For increments, the units this call actually applied after
    /// truncation. An override replaces rather than adds, so there it
    /// carries the stored count, equal to `claimed`. Callers must inspect
    /// this rather than assume the full request succeeded.
    pub applied: i32,
}

/// Request to purchase units of an item through the ledgered path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct PurchaseRequest {
    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub quantity: i32,

    pub delivery_target: DeliveryTarget,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,

    #[validate(length(max = 100, message = "Store name must be at most 100 characters"))]
    pub store_name: Option<String>,

    #[validate(length(max = 100, message = "Order number must be at most 100 characters"))]
    pub order_number: Option<String>,

    /// Buyer identity; all optional to support unauthenticated purchasers.
    pub buyer_user_id: Option<Uuid>,

    #[validate(length(max = 100, message = "Buyer name must be at most 100 characters"))]
    pub buyer_name: Option<String>,

    #[validate(email(message = "Invalid buyer email"))]
    pub buyer_email: Option<String>,
}

/// Response after a successful purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PurchaseResponse {
    pub record_id: Uuid,
    pub item_id: Uuid,
    /// Units actually granted; may be less than requested, never more.
    pub granted: i32,
    pub quantity: i32,
    pub claimed: i32,
}

/// A single ledger entry in a purchase history listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PurchaseRecordItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub delivery_target: DeliveryTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing purchase records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListPurchasesQuery {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Response for listing purchase records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListPurchasesResponse {
    pub data: Vec<PurchaseRecordItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_target_display() {
        assert_eq!(DeliveryTarget::Recipient.to_string(), "recipient");
        assert_eq!(DeliveryTarget::Purchaser.to_string(), "purchaser");
    }

    #[test]
    fn test_delivery_target_deserialize() {
        let target: DeliveryTarget = serde_json::from_str(r#""purchaser""#).unwrap();
        assert_eq!(target, DeliveryTarget::Purchaser);
    }

    #[test]
    fn test_delivery_target_rejects_unknown() {
        let result: Result<DeliveryTarget, _> = serde_json::from_str(r#""teleport""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_claim_request_accepts_any_integer() {
        let req: SetClaimRequest = serde_json::from_str(r#"{"claimed": -5}"#).unwrap();
        assert_eq!(req.claimed, -5);
    }

    #[test]
    fn test_add_claim_request_rejects_negative() {
        let req = AddClaimRequest { add: -1 };
        assert!(validator::Validate::validate(&req).is_err());
    }

    #[test]
    fn test_purchase_request_rejects_zero_quantity() {
        let req = PurchaseRequest {
            quantity: 0,
            delivery_target: DeliveryTarget::Recipient,
            note: None,
            store_name: None,
            order_number: None,
            buyer_user_id: None,
            buyer_name: None,
            buyer_email: None,
        };
        assert!(validator::Validate::validate(&req).is_err());
    }

    #[test]
    fn test_purchase_request_accepts_generated_email() {
        use fake::{faker::internet::en::SafeEmail, Fake};

        let req = PurchaseRequest {
            quantity: 2,
            delivery_target: DeliveryTarget::Recipient,
            note: Some("Wrapped in blue paper".to_string()),
            store_name: Some("Toy Barn".to_string()),
            order_number: Some("TB-10492".to_string()),
            buyer_user_id: Some(Uuid::new_v4()),
            buyer_name: Some("Aunt Val".to_string()),
            buyer_email: Some(SafeEmail().fake()),
        };
        assert!(validator::Validate::validate(&req).is_ok());
    }

    #[test]
    fn test_purchase_request_rejects_bad_email() {
        let req = PurchaseRequest {
            quantity: 1,
            delivery_target: DeliveryTarget::Purchaser,
            note: None,
            store_name: None,
            order_number: None,
            buyer_user_id: None,
            buyer_name: Some("Aunt Val".to_string()),
            buyer_email: Some("not-an-email".to_string()),
        };
        assert!(validator::Validate::validate(&req).is_err());
    }

    #[test]
    fn test_list_purchases_query_defaults() {
        let query: ListPurchasesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert!(query.cursor.is_none());
    }
}
