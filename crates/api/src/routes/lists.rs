//! Gift list route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    CreateListRequest, GiftItemResponse, GiftListResponse, OpenSharedListRequest,
    UpdateListRequest,
};
use persistence::entities::UnlockRequestStatusDb;
use persistence::repositories::{GiftItemRepository, GiftListRepository, UnlockRequestRepository};
use shared::{password, slug};

use crate::app::AppState;
use crate::error::ApiError;

/// A shared list as seen by a visitor who opened it through its slug.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenSharedListResponse {
    pub list: GiftListResponse,
    pub items: Vec<GiftItemResponse>,
}

/// Create a new gift list.
pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<GiftListResponse>), ApiError> {
    payload.validate()?;

    let password_hash = match &payload.password {
        Some(pw) => Some(
            password::hash_password(pw)
                .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?,
        ),
        None => None,
    };

    let share_slug = slug::generate_share_slug();

    let repo = GiftListRepository::new(state.pool.clone());
    let entity = repo
        .create(
            payload.owner_id,
            &payload.name,
            payload.description.as_deref(),
            payload.visibility.into(),
            &share_slug,
            password_hash.as_deref(),
            payload.owner_push_token.as_deref(),
        )
        .await?;

    tracing::info!(
        list_id = %entity.id,
        owner_id = %entity.owner_id,
        visibility = %payload.visibility,
        "Gift list created"
    );

    let list: domain::models::GiftList = entity.into();
    Ok((StatusCode::CREATED, Json(list.into())))
}

/// Fetch a gift list by ID.
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<GiftListResponse>, ApiError> {
    let repo = GiftListRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gift list not found".into()))?;

    let list: domain::models::GiftList = entity.into();
    Ok(Json(list.into()))
}

/// Partially update a gift list.
pub async fn update_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<UpdateListRequest>,
) -> Result<Json<GiftListResponse>, ApiError> {
    payload.validate()?;

    let repo = GiftListRepository::new(state.pool.clone());
    let entity = repo
        .update(
            list_id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.visibility.map(Into::into),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Gift list not found".into()))?;

    tracing::info!(list_id = %list_id, "Gift list updated");

    let list: domain::models::GiftList = entity.into();
    Ok(Json(list.into()))
}

/// Soft-delete a gift list.
pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = GiftListRepository::new(state.pool.clone());
    let deleted = repo.soft_delete(list_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Gift list not found".into()));
    }

    tracing::info!(list_id = %list_id, "Gift list deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Open a shared list through its slug.
///
/// Password-protected lists require either the correct password or the
/// ID of an approved unlock request for this list; visitors with
/// neither go through the unlock request workflow first.
pub async fn open_shared_list(
    State(state): State<AppState>,
    Path(share_slug): Path<String>,
    Json(payload): Json<OpenSharedListRequest>,
) -> Result<Json<OpenSharedListResponse>, ApiError> {
    let list_repo = GiftListRepository::new(state.pool.clone());
    let entity = list_repo
        .find_by_slug(&share_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Shared list not found".into()))?;

    if let Some(ref hash) = entity.password_hash {
        let unlocked = match payload.unlock_request_id {
            Some(request_id) => {
                let unlock_repo = UnlockRequestRepository::new(state.pool.clone());
                unlock_repo
                    .find_by_id(request_id)
                    .await?
                    .map(|r| r.list_id == entity.id && r.status == UnlockRequestStatusDb::Approved)
                    .unwrap_or(false)
            }
            None => false,
        };

        if !unlocked {
            let Some(ref provided) = payload.password else {
                return Err(ApiError::Forbidden("This list requires a password".into()));
            };

            let matches = password::verify_password(provided, hash)
                .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
            if !matches {
                return Err(ApiError::Forbidden("Incorrect password".into()));
            }
        }
    }

    let item_repo = GiftItemRepository::new(state.pool.clone());
    let items = item_repo.list_for_list(entity.id).await?;

    tracing::info!(list_id = %entity.id, "Shared list opened");

    let list: domain::models::GiftList = entity.into();
    Ok(Json(OpenSharedListResponse {
        list: list.into(),
        items: items
            .into_iter()
            .map(|i| domain::models::GiftItem::from(i).into())
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::{GiftItem, GiftItemStatus, GiftList, ListVisibility};

    #[test]
    fn test_open_shared_list_response_serialization() {
        let list = GiftList {
            id: Uuid::nil(),
            owner_id: Uuid::nil(),
            name: "Baby shower".to_string(),
            description: None,
            visibility: ListVisibility::Public,
            share_slug: "abc123def456".to_string(),
            password_protected: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let item = GiftItem {
            id: Uuid::nil(),
            list_id: Uuid::nil(),
            name: "Stroller".to_string(),
            url: None,
            price: None,
            status: GiftItemStatus::Active,
            quantity: 1,
            claimed: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = OpenSharedListResponse {
            list: list.into(),
            items: vec![item.into()],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"share_slug\":\"abc123def456\""));
        assert!(json.contains("\"available\":1"));
    }
}
