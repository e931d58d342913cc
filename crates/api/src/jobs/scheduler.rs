//! Interval scheduler driving the background jobs.
//!
//! Each registered job gets its own task ticking at the job's frequency.
//! Shutdown is signalled through a watch channel so every task can finish
//! its current run and exit before the server stops.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How often a job fires.
#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    /// Every N seconds. Used by the pool metrics sampler.
    Seconds(u64),
    /// Once an hour. Used by the unlock-request expiry sweep.
    Hourly,
}

impl JobFrequency {
    /// Interval between two runs.
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Hourly => Duration::from_secs(3600),
        }
    }
}

/// A background job the scheduler can run.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Job name used in log lines.
    fn name(&self) -> &'static str;

    /// How often this job runs.
    fn frequency(&self) -> JobFrequency;

    /// One run of the job. An error is logged and the next tick still fires.
    async fn execute(&self) -> Result<(), String>;
}

/// Owns the registered jobs and their running tasks.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    /// Register a job. Call before `start`.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one ticking task per registered job.
    ///
    /// The first tick is skipped so a freshly booted server does not run
    /// every job at once.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Job scheduler starting");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_rx.clone();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signal shutdown to every job task and return immediately.
    pub fn shutdown(&self) {
        info!("Job scheduler shutting down");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the job tasks to exit, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let frequency = job.frequency();
    let mut interval = tokio::time::interval(frequency.duration());

    // The first tick completes immediately; swallow it.
    interval.tick().await;

    info!(job = name, frequency = ?frequency, "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = std::time::Instant::now();
                match job.execute().await {
                    Ok(()) => info!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis(),
                        "Job run finished"
                    ),
                    Err(e) => error!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis(),
                        error = %e,
                        "Job run failed"
                    ),
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!(job = name, "Job stopping");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
        fail_every_run: bool,
    }

    impl CountingJob {
        fn new(runs: Arc<AtomicUsize>) -> Self {
            Self {
                runs,
                fail_every_run: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<(), String> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail_every_run {
                Err("induced failure".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_frequency_durations() {
        assert_eq!(JobFrequency::Seconds(10).duration(), Duration::from_secs(10));
        assert_eq!(JobFrequency::Hourly.duration(), Duration::from_secs(3600));
    }

    #[test]
    fn test_register_collects_jobs() {
        let mut scheduler = JobScheduler::new();
        assert!(scheduler.jobs.is_empty());
        scheduler.register(CountingJob::new(Arc::new(AtomicUsize::new(0))));
        scheduler.register(CountingJob::new(Arc::new(AtomicUsize::new(0))));
        assert_eq!(scheduler.jobs.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_skipped() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob::new(Arc::clone(&runs)));
        scheduler.start();

        // Less than one full interval: the immediate tick must not have run.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_on_each_interval() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob::new(Arc::clone(&runs)));
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);

        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_run_does_not_stop_the_job() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
            fail_every_run: true,
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(5)).await;
    }
}
