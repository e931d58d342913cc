//! Purchase record repository: the ledgered claim path.
//!
//! `record_purchase` is the single place a purchase record is created.
//! The table is append-only; no UPDATE or DELETE exists for it anywhere
//! in this crate.

use chrono::{DateTime, Utc};
use domain::services::claims;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{DeliveryTargetDb, GiftItemEntity, PurchaseRecordEntity};
use crate::metrics::QueryTimer;

/// Outcome of a purchase attempt.
#[derive(Debug, Clone)]
pub enum PurchaseOutcome {
    /// The purchase was granted: one new ledger entry, updated item state.
    Recorded {
        record: PurchaseRecordEntity,
        item: GiftItemEntity,
        granted: i32,
    },
    /// No item with that ID on that list; nothing was written.
    NotFound,
    /// The item is fully claimed (or the request granted zero units);
    /// nothing was written.
    NothingAvailable,
}

/// Optional metadata attached to a purchase.
#[derive(Debug, Clone, Default)]
pub struct PurchaseMeta<'a> {
    pub note: Option<&'a str>,
    pub store_name: Option<&'a str>,
    pub order_number: Option<&'a str>,
    pub buyer_user_id: Option<Uuid>,
    pub buyer_name: Option<&'a str>,
    pub buyer_email: Option<&'a str>,
}

/// Repository for purchase-record-related database operations.
#[derive(Clone)]
pub struct PurchaseRecordRepository {
    pool: PgPool,
}

impl PurchaseRecordRepository {
    /// Creates a new PurchaseRecordRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Execute a ledgered purchase against an item.
    ///
    /// Locks the item row, asks the claim arithmetic for a grant, and on
    /// success updates `claimed` and inserts exactly one purchase record
    /// carrying the granted quantity, all in one transaction. When the
    /// grant is zero the transaction is dropped without a single write,
    /// so a failed purchase can never leave partial state behind.
    pub async fn record_purchase(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        requested: i32,
        delivery_target: DeliveryTargetDb,
        meta: PurchaseMeta<'_>,
    ) -> Result<PurchaseOutcome, sqlx::Error> {
        let timer = QueryTimer::new("record_purchase");

        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE id = $1 AND list_id = $2
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .bind(list_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item) = item else {
            timer.record();
            return Ok(PurchaseOutcome::NotFound);
        };

        let grant = match claims::grant_purchase(item.quantity, item.claimed, requested) {
            Ok(grant) => grant,
            Err(claims::ClaimError::CapacityExhausted) => {
                timer.record();
                return Ok(PurchaseOutcome::NothingAvailable);
            }
        };

        let updated_item = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            UPDATE gift_items
            SET claimed = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            "#,
        )
        .bind(item_id)
        .bind(grant.claimed)
        .fetch_one(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, PurchaseRecordEntity>(
            r#"
            INSERT INTO purchase_records
                (list_id, item_id, quantity, delivery_target, note, store_name, order_number,
                 buyer_user_id, buyer_name, buyer_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, list_id, item_id, quantity, delivery_target, note, store_name,
                      order_number, buyer_user_id, buyer_name, buyer_email, created_at
            "#,
        )
        .bind(list_id)
        .bind(item_id)
        .bind(grant.granted)
        .bind(delivery_target)
        .bind(meta.note)
        .bind(meta.store_name)
        .bind(meta.order_number)
        .bind(meta.buyer_user_id)
        .bind(meta.buyer_name)
        .bind(meta.buyer_email)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();

        Ok(PurchaseOutcome::Recorded {
            record,
            item: updated_item,
            granted: grant.granted,
        })
    }

    /// List purchase records for an item, newest first, keyset-paginated.
    ///
    /// `cursor` carries the (created_at, id) of the last record of the
    /// previous page.
    pub async fn list_for_item(
        &self,
        item_id: Uuid,
        cursor: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<PurchaseRecordEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_purchase_records_for_item");

        let result = if let Some((created_at, id)) = cursor {
            sqlx::query_as::<_, PurchaseRecordEntity>(
                r#"
                SELECT id, list_id, item_id, quantity, delivery_target, note, store_name,
                       order_number, buyer_user_id, buyer_name, buyer_email, created_at
                FROM purchase_records
                WHERE item_id = $1 AND (created_at, id) < ($2, $3)
                ORDER BY created_at DESC, id DESC
                LIMIT $4
                "#,
            )
            .bind(item_id)
            .bind(created_at)
            .bind(id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, PurchaseRecordEntity>(
                r#"
                SELECT id, list_id, item_id, quantity, delivery_target, note, store_name,
                       order_number, buyer_user_id, buyer_name, buyer_email, created_at
                FROM purchase_records
                WHERE item_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(item_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Count purchase records for an item.
    pub async fn count_for_item(&self, item_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_purchase_records_for_item");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM purchase_records WHERE item_id = $1")
                .bind(item_id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_meta_default_is_empty() {
        let meta = PurchaseMeta::default();
        assert!(meta.note.is_none());
        assert!(meta.buyer_user_id.is_none());
    }

    #[test]
    fn test_purchase_outcome_variants() {
        assert!(matches!(PurchaseOutcome::NotFound, PurchaseOutcome::NotFound));
        assert!(matches!(
            PurchaseOutcome::NothingAvailable,
            PurchaseOutcome::NothingAvailable
        ));
    }
}
