//! Maintenance calendar route.

use axum::{extract::State, Json};
use domain::models::{MaintenanceCalendarResponse, Platoon, Vehicle};
use domain::services::{maintenance_calendar, Clock};
use persistence::repositories::{PlatoonRepository, VehicleRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// Every vehicle with its days until maintenance and status.
///
/// GET /api/v1/maintenance/calendar
pub async fn get_calendar(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceCalendarResponse>, ApiError> {
    let today = state.config.reminders.clock().today();
    let repo = VehicleRepository::new(state.pool.clone());
    let vehicles: Vec<Vehicle> = repo
        .list_all()
        .await?
        .into_iter()
        .map(Vehicle::from)
        .collect();

    let platoons: Vec<Platoon> = PlatoonRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Platoon::from)
        .collect();

    let calendar = maintenance_calendar(today, &vehicles, &platoons);
    tracing::debug!(
        today = %calendar.today,
        overdue = calendar.overdue,
        due_this_week = calendar.due_this_week,
        "Built maintenance calendar"
    );

    Ok(Json(calendar))
}
