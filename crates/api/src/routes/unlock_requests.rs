//! Unlock request route handlers for password-protected lists.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    CreateUnlockRequestRequest, ListUnlockRequestsQuery, RespondToUnlockRequestRequest,
    UnlockRequestResponse, UnlockRequestStatus,
};
use domain::services::{
    NotificationType, UnlockRequestedPayload, UnlockResponsePayload,
};
use persistence::repositories::{GiftListRepository, UnlockRequestRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// Paginated unlock request listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUnlockRequestsResponse {
    pub data: Vec<UnlockRequestResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// File an unlock request against a password-protected list.
///
/// The owner is notified best-effort after the request is stored; a
/// failed push never fails the request.
pub async fn create_unlock_request(
    State(state): State<AppState>,
    Path(share_slug): Path<String>,
    Json(payload): Json<CreateUnlockRequestRequest>,
) -> Result<(StatusCode, Json<UnlockRequestResponse>), ApiError> {
    payload.validate()?;

    let list_repo = GiftListRepository::new(state.pool.clone());
    let list = list_repo
        .find_by_slug(&share_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Shared list not found".into()))?;

    if list.password_hash.is_none() {
        return Err(ApiError::Validation(
            "This list is not password protected".into(),
        ));
    }

    let repo = UnlockRequestRepository::new(state.pool.clone());
    let entity = repo
        .create(
            list.id,
            &payload.requester_name,
            payload.message.as_deref(),
            state.config.limits.unlock_request_ttl_hours,
        )
        .await?;

    tracing::info!(
        request_id = %entity.id,
        list_id = %list.id,
        "Unlock request filed"
    );

    // Notify after commit; dropped if the owner has no token.
    if let Some(token) = list.owner_push_token.clone() {
        let notifier = state.notifier.clone();
        let notification = UnlockRequestedPayload {
            notification_type: NotificationType::UnlockRequested,
            list_id: list.id,
            list_name: list.name.clone(),
            requester_name: payload.requester_name.clone(),
            message: payload.message.clone(),
            timestamp: Utc::now(),
        };
        tokio::spawn(async move {
            let result = notifier.send_unlock_requested(&token, notification).await;
            tracing::debug!(result = ?result, "Unlock request notification dispatched");
        });
    }

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// Fetch a single unlock request.
///
/// Requesters poll this to learn whether the owner approved; an
/// approved request ID then opens the list.
pub async fn get_unlock_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<UnlockRequestResponse>, ApiError> {
    let repo = UnlockRequestRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Unlock request not found".into()))?;

    Ok(Json(entity.into()))
}

/// List unlock requests filed against a list.
pub async fn list_unlock_requests(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Query(query): Query<ListUnlockRequestsQuery>,
) -> Result<Json<ListUnlockRequestsResponse>, ApiError> {
    let list_repo = GiftListRepository::new(state.pool.clone());
    if list_repo.find_by_id(list_id).await?.is_none() {
        return Err(ApiError::NotFound("Gift list not found".into()));
    }

    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, state.config.limits.max_page_size);
    let offset = (page - 1) * per_page;

    let repo = UnlockRequestRepository::new(state.pool.clone());
    let status_filter = query.status.map(Into::into);

    let entities = repo
        .list_for_list(list_id, status_filter, per_page, offset)
        .await?;
    let total = repo.count_for_list(list_id, status_filter).await?;

    Ok(Json(ListUnlockRequestsResponse {
        data: entities.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Approve or deny a pending unlock request.
pub async fn respond_to_unlock_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<RespondToUnlockRequestRequest>,
) -> Result<Json<UnlockRequestResponse>, ApiError> {
    if !matches!(
        payload.status,
        UnlockRequestStatus::Approved | UnlockRequestStatus::Denied
    ) {
        return Err(ApiError::Validation(
            "Response status must be approved or denied".into(),
        ));
    }

    let repo = UnlockRequestRepository::new(state.pool.clone());
    let entity = repo
        .respond(request_id, payload.status.into(), payload.note.as_deref())
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Unlock request not found or already resolved".into())
        })?;

    tracing::info!(
        request_id = %request_id,
        status = %payload.status,
        "Unlock request resolved"
    );

    // Requesters are anonymous; the owner's devices get the decision
    // echoed so they stay in sync.
    let list_repo = GiftListRepository::new(state.pool.clone());
    if let Some(list) = list_repo.find_by_id(entity.list_id).await? {
        if let Some(token) = list.owner_push_token {
            let notifier = state.notifier.clone();
            let notification = UnlockResponsePayload {
                notification_type: NotificationType::UnlockResponse,
                request_id: entity.id,
                list_id: entity.list_id,
                status: payload.status.to_string(),
                note: payload.note.clone(),
                timestamp: Utc::now(),
            };
            tokio::spawn(async move {
                let result = notifier.send_unlock_response(&token, notification).await;
                tracing::debug!(result = ?result, "Unlock response notification dispatched");
            });
        }
    }

    Ok(Json(entity.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_serialization() {
        let response = ListUnlockRequestsResponse {
            data: vec![],
            total: 0,
            page: 1,
            per_page: 20,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total\":0"));
        assert!(json.contains("\"per_page\":20"));
    }

    #[test]
    fn test_pending_is_not_a_valid_response_status() {
        assert!(!matches!(
            UnlockRequestStatus::Pending,
            UnlockRequestStatus::Approved | UnlockRequestStatus::Denied
        ));
        assert!(!matches!(
            UnlockRequestStatus::Expired,
            UnlockRequestStatus::Approved | UnlockRequestStatus::Denied
        ));
    }
}
