//! Gift list domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Who can open a list through its share link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListVisibility {
    Public,
    Private,
}

impl std::fmt::Display for ListVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListVisibility::Public => write!(f, "public"),
            ListVisibility::Private => write!(f, "private"),
        }
    }
}

/// A gift list as seen by the domain layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GiftList {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: ListVisibility,
    pub share_slug: String,
    /// True when opening the list requires a password or an approved
    /// unlock request. The hash itself never leaves persistence.
    pub password_protected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a gift list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateListRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub visibility: ListVisibility,

    /// Optional list password; stored as an Argon2id hash.
    #[validate(length(min = 4, max = 128, message = "Password must be 4-128 characters"))]
    pub password: Option<String>,

    pub owner_id: Uuid,

    /// Optional push token for best-effort owner notifications.
    pub owner_push_token: Option<String>,
}

/// Partial update to a gift list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateListRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub visibility: Option<ListVisibility>,
}

/// Request to open a shared list through its slug.
///
/// Password-protected lists accept either the password or the ID of an
/// approved unlock request; neither is consulted for open lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenSharedListRequest {
    pub password: Option<String>,
    pub unlock_request_id: Option<Uuid>,
}

/// Gift list response payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GiftListResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: ListVisibility,
    pub share_slug: String,
    pub password_protected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GiftList> for GiftListResponse {
    fn from(list: GiftList) -> Self {
        Self {
            id: list.id,
            name: list.name,
            description: list.description,
            visibility: list.visibility,
            share_slug: list.share_slug,
            password_protected: list.password_protected,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}
