//! List unlock request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::unlock_request::{UnlockRequestResponse, UnlockRequestStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for unlock request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "unlock_request_status", rename_all = "lowercase")]
pub enum UnlockRequestStatusDb {
    Pending,
    Approved,
    Denied,
    Expired,
}

impl From<UnlockRequestStatusDb> for UnlockRequestStatus {
    fn from(s: UnlockRequestStatusDb) -> Self {
        match s {
            UnlockRequestStatusDb::Pending => UnlockRequestStatus::Pending,
            UnlockRequestStatusDb::Approved => UnlockRequestStatus::Approved,
            UnlockRequestStatusDb::Denied => UnlockRequestStatus::Denied,
            UnlockRequestStatusDb::Expired => UnlockRequestStatus::Expired,
        }
    }
}

impl From<UnlockRequestStatus> for UnlockRequestStatusDb {
    fn from(s: UnlockRequestStatus) -> Self {
        match s {
            UnlockRequestStatus::Pending => UnlockRequestStatusDb::Pending,
            UnlockRequestStatus::Approved => UnlockRequestStatusDb::Approved,
            UnlockRequestStatus::Denied => UnlockRequestStatusDb::Denied,
            UnlockRequestStatus::Expired => UnlockRequestStatusDb::Expired,
        }
    }
}

/// Database row mapping for the list_unlock_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct UnlockRequestEntity {
    pub id: Uuid,
    pub list_id: Uuid,
    pub requester_name: String,
    pub message: Option<String>,
    pub status: UnlockRequestStatusDb,
    pub response_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<UnlockRequestEntity> for UnlockRequestResponse {
    fn from(entity: UnlockRequestEntity) -> Self {
        UnlockRequestResponse {
            id: entity.id,
            list_id: entity.list_id,
            requester_name: entity.requester_name,
            message: entity.message,
            status: entity.status.into(),
            response_note: entity.response_note,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
            responded_at: entity.responded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_roundtrip() {
        for s in [
            UnlockRequestStatus::Pending,
            UnlockRequestStatus::Approved,
            UnlockRequestStatus::Denied,
            UnlockRequestStatus::Expired,
        ] {
            let db: UnlockRequestStatusDb = s.into();
            let back: UnlockRequestStatus = db.into();
            assert_eq!(back, s);
        }
    }
}
