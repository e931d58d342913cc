//! List unlock request repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UnlockRequestEntity, UnlockRequestStatusDb};
use crate::metrics::QueryTimer;

/// Repository for list-unlock-request database operations.
#[derive(Clone)]
pub struct UnlockRequestRepository {
    pool: PgPool,
}

impl UnlockRequestRepository {
    /// Creates a new UnlockRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new unlock request.
    pub async fn create(
        &self,
        list_id: Uuid,
        requester_name: &str,
        message: Option<&str>,
        ttl_hours: i64,
    ) -> Result<UnlockRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_unlock_request");
        let result = sqlx::query_as::<_, UnlockRequestEntity>(
            r#"
            INSERT INTO list_unlock_requests (list_id, requester_name, message, expires_at)
            VALUES ($1, $2, $3, NOW() + make_interval(hours => $4::int))
            RETURNING id, list_id, requester_name, message, status, response_note,
                      created_at, updated_at, expires_at, responded_at
            "#,
        )
        .bind(list_id)
        .bind(requester_name)
        .bind(message)
        .bind(ttl_hours)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an unlock request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UnlockRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_unlock_request_by_id");
        let result = sqlx::query_as::<_, UnlockRequestEntity>(
            r#"
            SELECT id, list_id, requester_name, message, status, response_note,
                   created_at, updated_at, expires_at, responded_at
            FROM list_unlock_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List unlock requests for a list, newest first.
    pub async fn list_for_list(
        &self,
        list_id: Uuid,
        status_filter: Option<UnlockRequestStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UnlockRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_unlock_requests_for_list");
        let result = if let Some(status) = status_filter {
            sqlx::query_as::<_, UnlockRequestEntity>(
                r#"
                SELECT id, list_id, requester_name, message, status, response_note,
                       created_at, updated_at, expires_at, responded_at
                FROM list_unlock_requests
                WHERE list_id = $1 AND status = $2
                ORDER BY created_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(list_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, UnlockRequestEntity>(
                r#"
                SELECT id, list_id, requester_name, message, status, response_note,
                       created_at, updated_at, expires_at, responded_at
                FROM list_unlock_requests
                WHERE list_id = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(list_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Count unlock requests for a list.
    pub async fn count_for_list(
        &self,
        list_id: Uuid,
        status_filter: Option<UnlockRequestStatusDb>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_unlock_requests_for_list");
        let result = if let Some(status) = status_filter {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM list_unlock_requests WHERE list_id = $1 AND status = $2",
            )
            .bind(list_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM list_unlock_requests WHERE list_id = $1",
            )
            .bind(list_id)
            .fetch_one(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Respond to an unlock request (approve or deny).
    ///
    /// Only pending requests can be responded to; returns `None` when the
    /// request is missing or already resolved.
    pub async fn respond(
        &self,
        id: Uuid,
        status: UnlockRequestStatusDb,
        response_note: Option<&str>,
    ) -> Result<Option<UnlockRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("respond_to_unlock_request");
        let result = sqlx::query_as::<_, UnlockRequestEntity>(
            r#"
            UPDATE list_unlock_requests
            SET status = $2, response_note = $3, responded_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, list_id, requester_name, message, status, response_note,
                      created_at, updated_at, expires_at, responded_at
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(response_note)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Expire old pending requests. Returns the number of rows expired.
    pub async fn expire_old_requests(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("expire_old_unlock_requests");
        let result = sqlx::query(
            r#"
            UPDATE list_unlock_requests
            SET status = 'expired', updated_at = NOW()
            WHERE status = 'pending' AND expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() as i64);
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
        assert_clone::<UnlockRequestRepository>();
    }
}
