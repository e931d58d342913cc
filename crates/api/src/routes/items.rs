//! Gift item route handlers.
//!
//! These cover item CRUD. The claim ledger operations live in the
//! `claims` and `purchases` modules.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateItemRequest, GiftItem, GiftItemResponse, UpdateItemRequest};
use persistence::repositories::{GiftItemRepository, GiftListRepository, QuantityUpdate};

use crate::app::AppState;
use crate::error::ApiError;

/// Response for listing items on a list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListItemsResponse {
    pub data: Vec<GiftItemResponse>,
    pub total: usize,
}

/// Add an item to a list.
pub async fn create_item(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<GiftItemResponse>), ApiError> {
    payload.validate()?;

    let list_repo = GiftListRepository::new(state.pool.clone());
    if list_repo.find_by_id(list_id).await?.is_none() {
        return Err(ApiError::NotFound("Gift list not found".into()));
    }

    let item_repo = GiftItemRepository::new(state.pool.clone());

    let existing = item_repo.list_for_list(list_id).await?;
    if existing.len() as i64 >= state.config.limits.max_items_per_list {
        return Err(ApiError::Validation(format!(
            "List cannot hold more than {} items",
            state.config.limits.max_items_per_list
        )));
    }

    let entity = item_repo
        .create(
            list_id,
            &payload.name,
            payload.url.as_deref(),
            payload.price,
            payload.quantity,
        )
        .await?;

    tracing::info!(
        item_id = %entity.id,
        list_id = %list_id,
        quantity = payload.quantity,
        "Gift item created"
    );

    Ok((StatusCode::CREATED, Json(GiftItem::from(entity).into())))
}

/// List all items on a list, newest first.
pub async fn list_items(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<ListItemsResponse>, ApiError> {
    let list_repo = GiftListRepository::new(state.pool.clone());
    if list_repo.find_by_id(list_id).await?.is_none() {
        return Err(ApiError::NotFound("Gift list not found".into()));
    }

    let item_repo = GiftItemRepository::new(state.pool.clone());
    let items = item_repo.list_for_list(list_id).await?;

    let data: Vec<GiftItemResponse> = items
        .into_iter()
        .map(|i| GiftItem::from(i).into())
        .collect();
    let total = data.len();

    Ok(Json(ListItemsResponse { data, total }))
}

/// Fetch a single item.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<GiftItemResponse>, ApiError> {
    let repo = GiftItemRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gift item not found".into()))?;

    Ok(Json(GiftItem::from(entity).into()))
}

/// Partially update an item.
///
/// Lowering the quantity below the current claimed count is rejected
/// with a conflict; claimed counts only move through the claim ledger.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<GiftItemResponse>, ApiError> {
    payload.validate()?;

    let repo = GiftItemRepository::new(state.pool.clone());
    let outcome = repo
        .update(
            item_id,
            payload.name.as_deref(),
            payload.url.as_deref(),
            payload.price,
            payload.status.map(Into::into),
            payload.quantity,
        )
        .await?;

    match outcome {
        QuantityUpdate::Updated(entity) => {
            tracing::info!(item_id = %item_id, "Gift item updated");
            Ok(Json(GiftItem::from(entity).into()))
        }
        QuantityUpdate::BelowClaimed { claimed } => Err(ApiError::Conflict(format!(
            "Quantity cannot be lowered below the {} units already claimed",
            claimed
        ))),
        QuantityUpdate::NotFound => Err(ApiError::NotFound("Gift item not found".into())),
    }
}

/// Delete an item and its purchase history.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = GiftItemRepository::new(state.pool.clone());
    let deleted = repo.delete(item_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Gift item not found".into()));
    }

    tracing::info!(item_id = %item_id, "Gift item deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::GiftItemStatus;

    #[test]
    fn test_list_items_response_serialization() {
        let item = GiftItem {
            id: Uuid::nil(),
            list_id: Uuid::nil(),
            name: "Puzzle".to_string(),
            url: None,
            price: Some(12.5),
            status: GiftItemStatus::Active,
            quantity: 3,
            claimed: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = ListItemsResponse {
            data: vec![item.into()],
            total: 1,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total\":1"));
        assert!(json.contains("\"available\":2"));
    }
}
