//! Background job scheduler and job implementations.

mod expire_unlock_requests;
mod pool_metrics;
mod scheduler;

pub use expire_unlock_requests::ExpireUnlockRequestsJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::JobScheduler;
