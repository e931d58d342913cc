//! Background job to expire stale unlock requests.

use sqlx::PgPool;

use persistence::repositories::UnlockRequestRepository;

use super::scheduler::{Job, JobFrequency};

/// Job that marks pending unlock requests past their TTL as expired.
pub struct ExpireUnlockRequestsJob {
    repo: UnlockRequestRepository,
}

impl ExpireUnlockRequestsJob {
    /// Create a new expiry job.
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: UnlockRequestRepository::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl Job for ExpireUnlockRequestsJob {
    fn name(&self) -> &'static str {
        "expire_unlock_requests"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let expired = self
            .repo
            .expire_old_requests()
            .await
            .map_err(|e| format!("Failed to expire unlock requests: {}", e))?;

        if expired > 0 {
            tracing::info!(expired = expired, "Expired stale unlock requests");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_frequency() {
        let freq = JobFrequency::Hourly;
        assert_eq!(freq.duration().as_secs(), 3600);
    }
}
