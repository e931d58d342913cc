//! Gift list repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GiftListEntity, ListVisibilityDb};
use crate::metrics::QueryTimer;

/// Repository for gift-list-related database operations.
#[derive(Clone)]
pub struct GiftListRepository {
    pool: PgPool,
}

impl GiftListRepository {
    /// Creates a new GiftListRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new gift list.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        visibility: ListVisibilityDb,
        share_slug: &str,
        password_hash: Option<&str>,
        owner_push_token: Option<&str>,
    ) -> Result<GiftListEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_gift_list");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            INSERT INTO gift_lists (owner_id, name, description, visibility, share_slug, password_hash, owner_push_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, name, description, visibility, share_slug, password_hash,
                      owner_push_token, is_active, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(visibility)
        .bind(share_slug)
        .bind(password_hash)
        .bind(owner_push_token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active gift list by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GiftListEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_gift_list_by_id");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            SELECT id, owner_id, name, description, visibility, share_slug, password_hash,
                   owner_push_token, is_active, created_at, updated_at
            FROM gift_lists
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active gift list by its share slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<GiftListEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_gift_list_by_slug");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            SELECT id, owner_id, name, description, visibility, share_slug, password_hash,
                   owner_push_token, is_active, created_at, updated_at
            FROM gift_lists
            WHERE share_slug = $1 AND is_active = true
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update a gift list. Unset fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        visibility: Option<ListVisibilityDb>,
    ) -> Result<Option<GiftListEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_gift_list");
        let result = sqlx::query_as::<_, GiftListEntity>(
            r#"
            UPDATE gift_lists
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                visibility = COALESCE($4, visibility),
                updated_at = NOW()
            WHERE id = $1 AND is_active = true
            RETURNING id, owner_id, name, description, visibility, share_slug, password_hash,
                      owner_push_token, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(visibility)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a gift list. Returns true when a row was deactivated.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_gift_list");
        let result = sqlx::query(
            r#"
            UPDATE gift_lists
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<GiftListRepository>();
    }
}
