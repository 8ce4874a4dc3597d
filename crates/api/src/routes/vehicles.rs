//! Vehicle directory routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{ListVehiclesQuery, ListVehiclesResponse, Vehicle, VehicleRequest};
use domain::services::vehicle_query;
use persistence::repositories::VehicleRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// List vehicles with optional filters and sorting.
///
/// GET /api/v1/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<Json<ListVehiclesResponse>, ApiError> {
    let repo = VehicleRepository::new(state.pool.clone());
    let vehicles: Vec<Vehicle> = repo
        .list_all()
        .await?
        .into_iter()
        .map(Vehicle::from)
        .collect();

    let vehicles = vehicle_query::apply(vehicles, &query);
    let total = vehicles.len();

    info!(
        total,
        sort_by = ?query.sort_by,
        sort_direction = ?query.sort_direction,
        "Listed vehicles"
    );

    Ok(Json(ListVehiclesResponse { vehicles, total }))
}

/// Create a vehicle.
///
/// POST /api/v1/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    request.validate()?;

    let repo = VehicleRepository::new(state.pool.clone());
    let vehicle = Vehicle::from(repo.create(&request).await?);

    info!(
        vehicle_id = %vehicle.id,
        vehicle_number = %vehicle.vehicle_number,
        maintenance_date = ?vehicle.maintenance_date,
        "Vehicle created"
    );

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Get one vehicle.
///
/// GET /api/v1/vehicles/:vehicle_id
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vehicle>, ApiError> {
    let repo = VehicleRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(vehicle_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

    Ok(Json(entity.into()))
}

/// Replace a vehicle's fields.
///
/// PUT /api/v1/vehicles/:vehicle_id
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<Vehicle>, ApiError> {
    request.validate()?;

    let repo = VehicleRepository::new(state.pool.clone());
    let vehicle: Vehicle = repo
        .update(vehicle_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Vehicle {} not found", vehicle_id)))?
        .into();

    info!(
        vehicle_id = %vehicle.id,
        maintenance_date = ?vehicle.maintenance_date,
        "Vehicle updated"
    );

    Ok(Json(vehicle))
}

/// Delete a vehicle and its delivery history.
///
/// DELETE /api/v1/vehicles/:vehicle_id
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = VehicleRepository::new(state.pool.clone());
    if !repo.delete(vehicle_id).await? {
        return Err(ApiError::NotFound(format!(
            "Vehicle {} not found",
            vehicle_id
        )));
    }

    info!(vehicle_id = %vehicle_id, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
