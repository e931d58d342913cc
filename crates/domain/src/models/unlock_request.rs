//! Unlock request domain models for the password-protected list workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status of a list unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockRequestStatus {
    Pending,
    Approved,
    Denied,
    Expired,
}

impl std::fmt::Display for UnlockRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnlockRequestStatus::Pending => write!(f, "pending"),
            UnlockRequestStatus::Approved => write!(f, "approved"),
            UnlockRequestStatus::Denied => write!(f, "denied"),
            UnlockRequestStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Request to file an unlock request against a password-protected list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateUnlockRequestRequest {
    #[validate(length(min = 1, max = 100, message = "Requester name must be 1-100 characters"))]
    pub requester_name: String,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Request for the list owner to approve or deny an unlock request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RespondToUnlockRequestRequest {
    pub status: UnlockRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Unlock request payload for responses and listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnlockRequestResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub requester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: UnlockRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing unlock requests on a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUnlockRequestsQuery {
    #[serde(default)]
    pub status: Option<UnlockRequestStatus>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}
