//! Reminder cycle routes.

use axum::{extract::State, Extension, Json};
use domain::services::DispatchReport;
use serde::Serialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::jobs::{CycleSummary, SchedulerState};
use crate::middleware::RequestId;

/// Scheduler status response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatusResponse {
    pub state: SchedulerState,
    pub interval_secs: u64,
    pub locale: &'static str,
    pub deduplicate: bool,
    pub last_cycle: Option<CycleSummary>,
}

/// Run one reminder cycle now and return its report.
///
/// POST /api/v1/reminders/run
///
/// Runs whether or not the scheduler is running. Reminders already delivered
/// today are reported as `already_delivered` and not sent again.
pub async fn run_now(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Result<Json<DispatchReport>, ApiError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);
    info!(request_id = ?request_id, "Manual reminder cycle requested");

    let report = state.reminders.run_cycle().await?;
    Ok(Json(report))
}

/// Scheduler state, period and the last cycle's summary.
///
/// GET /api/v1/reminders/status
pub async fn status(State(state): State<AppState>) -> Json<ReminderStatusResponse> {
    let scheduler_state = state.scheduler.lock().await.state();
    let reminders = &state.config.reminders;

    Json(ReminderStatusResponse {
        state: scheduler_state,
        interval_secs: state.reminders.interval().as_secs(),
        locale: reminders.locale().as_str(),
        deduplicate: reminders.deduplicate,
        last_cycle: state.reminders.last_cycle().await,
    })
}
