//! Job scheduler infrastructure for background tasks.
//!
//! A scheduler is either running or stopped. Starting spawns one periodic
//! task per registered job; stopping cancels the timers without aborting a
//! job execution that is already in flight.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Job frequency for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFrequency {
    /// Run every N seconds.
    Seconds(u64),
    /// Run once a day (every 24 hours from start, not calendar aligned).
    Daily,
    /// Run at an arbitrary fixed period.
    Every(Duration),
}

impl JobFrequency {
    /// Get the duration between job executions.
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Daily => Duration::from_secs(86400),
            JobFrequency::Every(period) => *period,
        }
    }
}

/// Trait for implementing background jobs.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// The name of this job (used for logging).
    fn name(&self) -> &'static str;

    /// The frequency at which this job should run.
    fn frequency(&self) -> JobFrequency;

    /// Whether the job runs immediately when the scheduler starts.
    fn run_on_start(&self) -> bool {
        false
    }

    /// Execute the job. Returns Ok(()) on success, Err with message on failure.
    async fn execute(&self) -> Result<(), String>;
}

/// Lifecycle state of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Background job scheduler.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    cancel: Option<CancellationToken>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    /// Create a new, stopped job scheduler.
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            cancel: None,
            handles: Vec::new(),
        }
    }

    /// Register a job with the scheduler.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Register a job that is also used elsewhere.
    pub fn register_shared(&mut self, job: Arc<dyn Job>) {
        self.jobs.push(job);
    }

    pub fn state(&self) -> SchedulerState {
        if self.cancel.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    /// Start all registered jobs. No-op when already running.
    pub fn start(&mut self) {
        if self.cancel.is_some() {
            return;
        }

        info!("Starting job scheduler with {} jobs", self.jobs.len());
        self.handles.retain(|h| !h.is_finished());

        let cancel = CancellationToken::new();
        for job in &self.jobs {
            let handle = tokio::spawn(run_job_loop(Arc::clone(job), cancel.clone()));
            self.handles.push(handle);
        }
        self.cancel = Some(cancel);
    }

    /// Stop scheduling new executions. Returns immediately; executions
    /// already in flight run to completion.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            info!("Stopping job scheduler");
            cancel.cancel();
        }
    }

    /// Start or stop the scheduler.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Stop and wait for in-flight executions, up to `timeout`.
    pub async fn shutdown(&mut self, timeout: Duration) {
        self.stop();
        info!("Waiting for jobs to complete (timeout: {:?})", timeout);

        let handles = std::mem::take(&mut self.handles);
        let shutdown_future = async {
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, shutdown_future).await {
            Ok(()) => info!("All jobs completed gracefully"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job_loop(job: Arc<dyn Job>, cancel: CancellationToken) {
    let name = job.name();
    let frequency = job.frequency();
    let mut interval = tokio::time::interval(frequency.duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately
    if !job.run_on_start() {
        interval.tick().await;
    }

    info!(job = name, frequency = ?frequency, "Job scheduled");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(job = name, "Job shutting down");
                break;
            }
            _ = interval.tick() => {
                let start = std::time::Instant::now();
                info!(job = name, "Job starting");

                match job.execute().await {
                    Ok(()) => {
                        info!(
                            job = name,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "Job completed successfully"
                        );
                    }
                    Err(e) => {
                        error!(
                            job = name,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            error = %e,
                            "Job failed"
                        );
                    }
                }
            }
        }
    }
}
