//! Purchase record entity (database row mapping).
//!
//! Purchase records are append-only: the repository exposes no UPDATE or
//! DELETE for this table.

use chrono::{DateTime, Utc};
use domain::models::purchase::{DeliveryTarget, PurchaseRecordItem};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for delivery target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "delivery_target", rename_all = "lowercase")]
pub enum DeliveryTargetDb {
    Recipient,
    Purchaser,
}

impl From<DeliveryTargetDb> for DeliveryTarget {
    fn from(t: DeliveryTargetDb) -> Self {
        match t {
            DeliveryTargetDb::Recipient => DeliveryTarget::Recipient,
            DeliveryTargetDb::Purchaser => DeliveryTarget::Purchaser,
        }
    }
}

impl From<DeliveryTarget> for DeliveryTargetDb {
    fn from(t: DeliveryTarget) -> Self {
        match t {
            DeliveryTarget::Recipient => DeliveryTargetDb::Recipient,
            DeliveryTarget::Purchaser => DeliveryTargetDb::Purchaser,
        }
    }
}

/// Database row mapping for the purchase_records table.
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRecordEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub delivery_target: DeliveryTargetDb,
    pub note: Option<String>,
    pub store_name: Option<String>,
    pub order_number: Option<String>,
    pub buyer_user_id: Option<Uuid>,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseRecordEntity> for PurchaseRecordItem {
    fn from(entity: PurchaseRecordEntity) -> Self {
        PurchaseRecordItem {
            id: entity.id,
            list_id: entity.list_id,
            item_id: entity.item_id,
            quantity: entity.quantity,
            delivery_target: entity.delivery_target.into(),
            note: entity.note,
            store_name: entity.store_name,
            order_number: entity.order_number,
            buyer_user_id: entity.buyer_user_id,
            buyer_name: entity.buyer_name,
            buyer_email: entity.buyer_email,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_target_conversion_roundtrip() {
        for t in [DeliveryTarget::Recipient, DeliveryTarget::Purchaser] {
            let db: DeliveryTargetDb = t.into();
            let back: DeliveryTarget = db.into();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn test_entity_to_listing_item() {
        let entity = PurchaseRecordEntity {
            id: Uuid::new_v4(),
            list_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            quantity: 1,
            delivery_target: DeliveryTargetDb::Purchaser,
            note: None,
            store_name: Some("Toy Barn".to_string()),
            order_number: None,
            buyer_user_id: None,
            buyer_name: Some("Anonymous cousin".to_string()),
            buyer_email: None,
            created_at: Utc::now(),
        };
        let item: PurchaseRecordItem = entity.into();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.delivery_target, DeliveryTarget::Purchaser);
    }
}
