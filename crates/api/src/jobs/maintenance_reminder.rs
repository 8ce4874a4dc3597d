//! Background job that sends maintenance reminders.
//!
//! One cycle reads the notification settings and the vehicle list, works out
//! which vehicles hit a reminder threshold today and sends the reminders
//! through the enabled channels.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use domain::services::{
    Clock, DirectoryError, DispatchReport, NotificationDispatcher, SettingsStore,
    VehicleDirectory,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::scheduler::{Job, JobFrequency};
use crate::middleware::metrics::{record_reminder_cycle, record_reminder_outcomes};

/// A reminder cycle that could not evaluate the fleet.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Failed to load notification settings: {0}")]
    Settings(#[source] DirectoryError),

    #[error("Failed to load vehicles: {0}")]
    Vehicles(#[source] DirectoryError),
}

/// What happened in the most recent cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub finished_at: DateTime<Utc>,
    pub today: NaiveDate,
    /// `ok`, `skipped` or `error`
    pub result: &'static str,
    pub vehicles_evaluated: usize,
    pub sent: usize,
    pub failed: usize,
    pub already_delivered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CycleSummary {
    fn from_report(result: &'static str, report: &DispatchReport) -> Self {
        Self {
            finished_at: Utc::now(),
            today: report.today,
            result,
            vehicles_evaluated: report.vehicles_evaluated,
            sent: report.sent,
            failed: report.failed,
            already_delivered: report.already_delivered,
            error: None,
        }
    }

    fn from_error(today: NaiveDate, error: &CycleError) -> Self {
        Self {
            finished_at: Utc::now(),
            today,
            result: "error",
            vehicles_evaluated: 0,
            sent: 0,
            failed: 0,
            already_delivered: 0,
            error: Some(error.to_string()),
        }
    }
}

/// Job that evaluates the fleet and dispatches due reminders.
pub struct MaintenanceReminderJob {
    settings: Arc<dyn SettingsStore>,
    vehicles: Arc<dyn VehicleDirectory>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    interval: Duration,
    // Serializes scheduled and manually triggered cycles
    cycle_lock: Mutex<()>,
    last_cycle: RwLock<Option<CycleSummary>>,
}

impl MaintenanceReminderJob {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        vehicles: Arc<dyn VehicleDirectory>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            settings,
            vehicles,
            dispatcher,
            clock,
            interval,
            cycle_lock: Mutex::new(()),
            last_cycle: RwLock::new(None),
        }
    }

    /// Period between scheduled cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Summary of the most recent cycle, if any ran.
    pub async fn last_cycle(&self) -> Option<CycleSummary> {
        self.last_cycle.read().await.clone()
    }

    /// Runs one reminder cycle.
    ///
    /// Settings and vehicles are read once at the start; the cycle works on
    /// that snapshot. When no channel is enabled the vehicle list is not
    /// read and an empty report is returned. Individual send failures are
    /// part of the report, not an error.
    pub async fn run_cycle(&self) -> Result<DispatchReport, CycleError> {
        let _guard = self.cycle_lock.lock().await;
        let start = Instant::now();
        let today = self.clock.today();

        let result = self.evaluate(today).await;
        let elapsed = start.elapsed().as_secs_f64();

        let summary = match &result {
            Ok(Some(report)) => {
                record_reminder_outcomes(report);
                record_reminder_cycle("ok", elapsed);
                info!(
                    today = %report.today,
                    vehicles = report.vehicles_evaluated,
                    notices = report.notices.len(),
                    sent = report.sent,
                    failed = report.failed,
                    already_delivered = report.already_delivered,
                    "Reminder cycle completed"
                );
                CycleSummary::from_report("ok", report)
            }
            Ok(None) => {
                record_reminder_cycle("skipped", elapsed);
                info!(today = %today, "No notification channel enabled; reminder cycle skipped");
                CycleSummary::from_report("skipped", &DispatchReport::empty(today))
            }
            Err(e) => {
                record_reminder_cycle("error", elapsed);
                warn!(today = %today, error = %e, "Reminder cycle abandoned");
                CycleSummary::from_error(today, e)
            }
        };
        *self.last_cycle.write().await = Some(summary);

        result.map(|report| report.unwrap_or_else(|| DispatchReport::empty(today)))
    }

    async fn evaluate(&self, today: NaiveDate) -> Result<Option<DispatchReport>, CycleError> {
        let settings = self
            .settings
            .load_settings()
            .await
            .map_err(CycleError::Settings)?;

        if !settings.any_channel_enabled() {
            return Ok(None);
        }

        let vehicles = self
            .vehicles
            .list_vehicles()
            .await
            .map_err(CycleError::Vehicles)?;

        Ok(Some(
            self.dispatcher.dispatch(today, &vehicles, &settings).await,
        ))
    }
}

#[async_trait::async_trait]
impl Job for MaintenanceReminderJob {
    fn name(&self) -> &'static str {
        "maintenance_reminders"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Every(self.interval)
    }

    fn run_on_start(&self) -> bool {
        true
    }

    async fn execute(&self) -> Result<(), String> {
        self.run_cycle().await.map(|_| ()).map_err(|e| e.to_string())
    }
}
