//! Background job scheduler and job implementations.

mod maintenance_reminder;
mod pool_metrics;
mod scheduler;

pub use maintenance_reminder::{CycleError, CycleSummary, MaintenanceReminderJob};
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler, SchedulerState};
