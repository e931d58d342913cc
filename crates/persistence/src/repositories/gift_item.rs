//! Gift item repository for database operations.
//!
//! The claim operations here (`set_claimed`, `add_claimed`) are the only
//! writers of the `claimed` column besides `record_purchase` in the
//! purchase record repository. Each runs its read-compute-write as one
//! transaction with a `FOR UPDATE` row lock, so concurrent callers never
//! compute against a stale claimed count.

use domain::services::claims;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GiftItemEntity, GiftItemStatusDb};
use crate::metrics::QueryTimer;

/// Outcome of a guarded quantity update.
#[derive(Debug, Clone)]
pub enum QuantityUpdate {
    /// The item was updated.
    Updated(GiftItemEntity),
    /// The requested quantity is below the current claimed count.
    BelowClaimed { claimed: i32 },
    /// No active item with that ID.
    NotFound,
}

/// Repository for gift-item-related database operations.
#[derive(Clone)]
pub struct GiftItemRepository {
    pool: PgPool,
}

impl GiftItemRepository {
    /// Creates a new GiftItemRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new gift item with claimed initialized to zero.
    pub async fn create(
        &self,
        list_id: Uuid,
        name: &str,
        url: Option<&str>,
        price: Option<f64>,
        quantity: i32,
    ) -> Result<GiftItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_gift_item");
        let result = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            INSERT INTO gift_items (list_id, name, url, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(name)
        .bind(url)
        .bind(price)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a gift item by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GiftItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_gift_item_by_id");
        let result = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all items on a list, newest first.
    pub async fn list_for_list(&self, list_id: Uuid) -> Result<Vec<GiftItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_gift_items_for_list");
        let result = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE list_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update an item.
    ///
    /// Quantity edits are guarded: a new quantity below the current
    /// claimed count is rejected inside the transaction rather than
    /// silently clamping `claimed`, which only the ledger may write.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        url: Option<&str>,
        price: Option<f64>,
        status: Option<GiftItemStatusDb>,
        quantity: Option<i32>,
    ) -> Result<QuantityUpdate, sqlx::Error> {
        let timer = QueryTimer::new("update_gift_item");

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            timer.record();
            return Ok(QuantityUpdate::NotFound);
        };

        if let Some(quantity) = quantity {
            if quantity < current.claimed {
                timer.record();
                return Ok(QuantityUpdate::BelowClaimed {
                    claimed: current.claimed,
                });
            }
        }

        let updated = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            UPDATE gift_items
            SET name = COALESCE($2, name),
                url = COALESCE($3, url),
                price = COALESCE($4, price),
                status = COALESCE($5, status),
                quantity = COALESCE($6, quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(url)
        .bind(price)
        .bind(status)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(QuantityUpdate::Updated(updated))
    }

    /// Delete a gift item. Returns true when a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_gift_item");
        let result = sqlx::query("DELETE FROM gift_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Override an item's claimed count, clamped into `0..=quantity`.
    ///
    /// Backs the "unmark as purchased" action. This path deliberately
    /// writes no purchase record; manual corrections stay out of the
    /// ledger. Returns `None` when the item does not exist.
    pub async fn set_claimed(
        &self,
        id: Uuid,
        requested: i32,
    ) -> Result<Option<GiftItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_claimed");

        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item) = item else {
            timer.record();
            return Ok(None);
        };

        let next = claims::override_claimed(item.quantity, requested);

        let updated = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            UPDATE gift_items
            SET claimed = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(updated))
    }

    /// Increment an item's claimed count, truncated to the room left.
    ///
    /// Returns the updated item together with the units actually applied.
    /// A fully-claimed item yields `applied == 0` as a successful no-op.
    /// Returns `None` when the item does not exist.
    pub async fn add_claimed(
        &self,
        id: Uuid,
        delta: i32,
    ) -> Result<Option<(GiftItemEntity, i32)>, sqlx::Error> {
        let timer = QueryTimer::new("add_claimed");

        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            SELECT id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            FROM gift_items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item) = item else {
            timer.record();
            return Ok(None);
        };

        let outcome = claims::apply_claim(item.quantity, item.claimed, delta);

        let updated = sqlx::query_as::<_, GiftItemEntity>(
            r#"
            UPDATE gift_items
            SET claimed = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, list_id, name, url, price, status, quantity, claimed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(outcome.claimed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some((updated, outcome.applied)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_update_variants() {
        let below = QuantityUpdate::BelowClaimed { claimed: 3 };
        assert!(matches!(
            below,
            QuantityUpdate::BelowClaimed { claimed: 3 }
        ));
        assert!(matches!(QuantityUpdate::NotFound, QuantityUpdate::NotFound));
    }
}
