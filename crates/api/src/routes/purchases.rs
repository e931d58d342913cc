//! Purchase route handlers: the ledgered claim path.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    ListPurchasesQuery, ListPurchasesResponse, PurchaseRecordItem, PurchaseRequest,
    PurchaseResponse,
};
use persistence::repositories::{PurchaseMeta, PurchaseOutcome, PurchaseRecordRepository};
use shared::pagination;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_purchase_capacity_exhausted, record_purchase_granted};

/// Purchase units of an item.
///
/// The grant is the requested quantity truncated to what is available.
/// A grant of zero units is a capacity-exhausted failure and writes
/// nothing; a positive grant updates the claimed count and appends
/// exactly one purchase record, atomically.
pub async fn purchase(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    payload.validate()?;

    let repo = PurchaseRecordRepository::new(state.pool.clone());

    let meta = PurchaseMeta {
        note: payload.note.as_deref(),
        store_name: payload.store_name.as_deref(),
        order_number: payload.order_number.as_deref(),
        buyer_user_id: payload.buyer_user_id,
        buyer_name: payload.buyer_name.as_deref(),
        buyer_email: payload.buyer_email.as_deref(),
    };

    let outcome = repo
        .record_purchase(
            list_id,
            item_id,
            payload.quantity,
            payload.delivery_target.into(),
            meta,
        )
        .await?;

    match outcome {
        PurchaseOutcome::Recorded {
            record,
            item,
            granted,
        } => {
            record_purchase_granted(granted);

            if granted < payload.quantity {
                tracing::info!(
                    item_id = %item_id,
                    requested = payload.quantity,
                    granted = granted,
                    "Purchase partially granted"
                );
            } else {
                tracing::info!(
                    item_id = %item_id,
                    granted = granted,
                    "Purchase recorded"
                );
            }

            Ok((
                StatusCode::CREATED,
                Json(PurchaseResponse {
                    record_id: record.id,
                    item_id: item.id,
                    granted,
                    quantity: item.quantity,
                    claimed: item.claimed,
                }),
            ))
        }
        PurchaseOutcome::NotFound => {
            Err(ApiError::NotFound("Gift item not found on this list".into()))
        }
        PurchaseOutcome::NothingAvailable => {
            record_purchase_capacity_exhausted();
            tracing::info!(item_id = %item_id, "Purchase rejected, item fully claimed");
            Err(ApiError::CapacityExhausted(
                "All units of this item are already claimed".into(),
            ))
        }
    }
}

/// List the purchase history of an item, newest first.
///
/// Keyset-paginated through an opaque cursor.
pub async fn list_purchases(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Query(query): Query<ListPurchasesQuery>,
) -> Result<Json<ListPurchasesResponse>, ApiError> {
    let limit = query.limit.clamp(1, state.config.limits.max_page_size);

    let cursor = match &query.cursor {
        Some(raw) => Some(
            pagination::decode_cursor(raw)
                .map_err(|_| ApiError::Validation("Invalid pagination cursor".into()))?,
        ),
        None => None,
    };

    let repo = PurchaseRecordRepository::new(state.pool.clone());

    // Fetch one extra row to detect whether another page exists.
    let mut records = repo.list_for_item(item_id, cursor, limit + 1).await?;

    let next_cursor = if records.len() as i64 > limit {
        records.truncate(limit as usize);
        records
            .last()
            .map(|r| pagination::encode_cursor(r.created_at, r.id))
    } else {
        None
    };

    let data: Vec<PurchaseRecordItem> = records.into_iter().map(Into::into).collect();

    Ok(Json(ListPurchasesResponse { data, next_cursor }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_response_serialization() {
        let response = PurchaseResponse {
            record_id: Uuid::nil(),
            item_id: Uuid::nil(),
            granted: 2,
            quantity: 5,
            claimed: 4,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"granted\":2"));
        assert!(json.contains("\"claimed\":4"));
    }

    #[test]
    fn test_list_purchases_response_omits_empty_cursor() {
        let response = ListPurchasesResponse {
            data: vec![],
            next_cursor: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("next_cursor"));
    }
}
