//! Per-vehicle maintenance log routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateMaintenanceLogRequest, ListMaintenanceLogsResponse, MaintenanceLog};
use persistence::repositories::{MaintenanceLogRepository, VehicleRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

async fn ensure_vehicle_exists(state: &AppState, vehicle_id: Uuid) -> Result<(), ApiError> {
    VehicleRepository::new(state.pool.clone())
        .find_by_id(vehicle_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle {} not found", vehicle_id)))
}

/// A vehicle's maintenance log, newest first.
///
/// GET /api/v1/vehicles/:vehicle_id/maintenance-logs
pub async fn list_logs(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ListMaintenanceLogsResponse>, ApiError> {
    ensure_vehicle_exists(&state, vehicle_id).await?;

    let repo = MaintenanceLogRepository::new(state.pool.clone());
    let logs: Vec<MaintenanceLog> = repo
        .find_by_vehicle(vehicle_id)
        .await?
        .into_iter()
        .map(MaintenanceLog::from)
        .collect();
    let total = logs.len();

    Ok(Json(ListMaintenanceLogsResponse {
        vehicle_id,
        logs,
        total,
    }))
}

/// Append an entry to a vehicle's maintenance log.
///
/// POST /api/v1/vehicles/:vehicle_id/maintenance-logs
pub async fn append_log(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceLogRequest>,
) -> Result<(StatusCode, Json<MaintenanceLog>), ApiError> {
    request.validate()?;
    ensure_vehicle_exists(&state, vehicle_id).await?;

    let repo = MaintenanceLogRepository::new(state.pool.clone());
    let log = MaintenanceLog::from(repo.append(vehicle_id, &request).await?);

    info!(
        vehicle_id = %vehicle_id,
        log_id = %log.id,
        "Maintenance log entry added"
    );
    Ok((StatusCode::CREATED, Json(log)))
}
