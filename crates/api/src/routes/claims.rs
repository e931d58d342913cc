//! Claim route handlers: direct claimed-count writes outside the ledger.
//!
//! `set_claim` backs the "unmark as purchased" action and deliberately
//! writes no purchase record. `add_claim` reserves units without a
//! purchase, truncated to what is still available.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{AddClaimRequest, ClaimResponse, SetClaimRequest};
use persistence::repositories::GiftItemRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_claim_applied;

/// Override an item's claimed count.
///
/// Any integer is accepted and clamped into `0..=quantity`; the response
/// reports the count actually stored.
pub async fn set_claim(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<SetClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let repo = GiftItemRepository::new(state.pool.clone());

    let entity = repo
        .set_claimed(item_id, payload.claimed)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gift item not found".into()))?;

    tracing::info!(
        item_id = %item_id,
        requested = payload.claimed,
        claimed = entity.claimed,
        "Claimed count overridden"
    );

    Ok(Json(ClaimResponse {
        item_id: entity.id,
        quantity: entity.quantity,
        claimed: entity.claimed,
        applied: entity.claimed,
    }))
}

/// Increment an item's claimed count.
///
/// The increment is truncated to the units still available. Claiming on
/// a fully-claimed item succeeds with `applied == 0`.
pub async fn add_claim(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<AddClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    payload.validate()?;

    let repo = GiftItemRepository::new(state.pool.clone());

    let (entity, applied) = repo
        .add_claimed(item_id, payload.add)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gift item not found".into()))?;

    record_claim_applied(applied);

    tracing::info!(
        item_id = %item_id,
        requested = payload.add,
        applied = applied,
        claimed = entity.claimed,
        "Claim increment applied"
    );

    Ok(Json(ClaimResponse {
        item_id: entity.id,
        quantity: entity.quantity,
        claimed: entity.claimed,
        applied,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_response_serialization() {
        let response = ClaimResponse {
            item_id: Uuid::nil(),
            quantity: 5,
            claimed: 3,
            applied: 1,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"quantity\":5"));
        assert!(json.contains("\"claimed\":3"));
        assert!(json.contains("\"applied\":1"));
    }
}
