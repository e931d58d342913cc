//! Gift list entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::gift_list::{GiftList, ListVisibility};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for list visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "list_visibility", rename_all = "lowercase")]
pub enum ListVisibilityDb {
    Public,
    Private,
}

impl From<ListVisibilityDb> for ListVisibility {
    fn from(v: ListVisibilityDb) -> Self {
        match v {
            ListVisibilityDb::Public => ListVisibility::Public,
            ListVisibilityDb::Private => ListVisibility::Private,
        }
    }
}

impl From<ListVisibility> for ListVisibilityDb {
    fn from(v: ListVisibility) -> Self {
        match v {
            ListVisibility::Public => ListVisibilityDb::Public,
            ListVisibility::Private => ListVisibilityDb::Private,
        }
    }
}

/// Database row mapping for the gift_lists table.
#[derive(Debug, Clone, FromRow)]
pub struct GiftListEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: ListVisibilityDb,
    pub share_slug: String,
    pub password_hash: Option<String>,
    pub owner_push_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GiftListEntity> for GiftList {
    fn from(entity: GiftListEntity) -> Self {
        GiftList {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            visibility: entity.visibility.into(),
            share_slug: entity.share_slug,
            password_protected: entity.password_hash.is_some(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_conversion_roundtrip() {
        for v in [ListVisibility::Public, ListVisibility::Private] {
            let db: ListVisibilityDb = v.into();
            let back: ListVisibility = db.into();
            assert_eq!(back, v);
        }
    }

    #[test]
    fn test_password_protected_derived_from_hash() {
        let entity = GiftListEntity {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Baby shower".to_string(),
            description: None,
            visibility: ListVisibilityDb::Private,
            share_slug: "a1b2c3d4e5f6".to_string(),
            password_hash: Some("$argon2id$...".to_string()),
            owner_push_token: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let list: GiftList = entity.into();
        assert!(list.password_protected);
    }
}
