//! Platoon and vehicle type routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreatePlatoonRequest, CreateVehicleTypeRequest, ListPlatoonsResponse,
    ListVehicleTypesResponse, Platoon, VehicleType,
};
use persistence::repositories::{PlatoonRepository, VehicleTypeRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// List platoons ordered by name.
///
/// GET /api/v1/platoons
pub async fn list_platoons(
    State(state): State<AppState>,
) -> Result<Json<ListPlatoonsResponse>, ApiError> {
    let repo = PlatoonRepository::new(state.pool.clone());
    let platoons: Vec<Platoon> = repo
        .list_all()
        .await?
        .into_iter()
        .map(Platoon::from)
        .collect();
    let total = platoons.len();

    Ok(Json(ListPlatoonsResponse { platoons, total }))
}

/// Create a platoon.
///
/// POST /api/v1/platoons
pub async fn create_platoon(
    State(state): State<AppState>,
    Json(request): Json<CreatePlatoonRequest>,
) -> Result<(StatusCode, Json<Platoon>), ApiError> {
    request.validate()?;

    let repo = PlatoonRepository::new(state.pool.clone());
    let platoon = Platoon::from(repo.create(&request).await?);

    info!(platoon_id = %platoon.id, name = %platoon.name, "Platoon created");
    Ok((StatusCode::CREATED, Json(platoon)))
}

/// Delete a platoon. Its vehicles become unassigned.
///
/// DELETE /api/v1/platoons/:platoon_id
pub async fn delete_platoon(
    State(state): State<AppState>,
    Path(platoon_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PlatoonRepository::new(state.pool.clone());
    if !repo.delete(platoon_id).await? {
        return Err(ApiError::NotFound(format!(
            "Platoon {} not found",
            platoon_id
        )));
    }

    info!(platoon_id = %platoon_id, "Platoon deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// List vehicle types ordered by name.
///
/// GET /api/v1/vehicle-types
pub async fn list_vehicle_types(
    State(state): State<AppState>,
) -> Result<Json<ListVehicleTypesResponse>, ApiError> {
    let repo = VehicleTypeRepository::new(state.pool.clone());
    let vehicle_types: Vec<VehicleType> = repo
        .list_all()
        .await?
        .into_iter()
        .map(VehicleType::from)
        .collect();
    let total = vehicle_types.len();

    Ok(Json(ListVehicleTypesResponse {
        vehicle_types,
        total,
    }))
}

/// Create a vehicle type.
///
/// POST /api/v1/vehicle-types
pub async fn create_vehicle_type(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleTypeRequest>,
) -> Result<(StatusCode, Json<VehicleType>), ApiError> {
    request.validate()?;

    let repo = VehicleTypeRepository::new(state.pool.clone());
    let vehicle_type = VehicleType::from(repo.create(&request).await?);

    info!(
        vehicle_type_id = %vehicle_type.id,
        name = %vehicle_type.name,
        "Vehicle type created"
    );
    Ok((StatusCode::CREATED, Json(vehicle_type)))
}

/// Delete a vehicle type. Vehicles of that type keep existing without one.
///
/// DELETE /api/v1/vehicle-types/:vehicle_type_id
pub async fn delete_vehicle_type(
    State(state): State<AppState>,
    Path(vehicle_type_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = VehicleTypeRepository::new(state.pool.clone());
    if !repo.delete(vehicle_type_id).await? {
        return Err(ApiError::NotFound(format!(
            "Vehicle type {} not found",
            vehicle_type_id
        )));
    }

    info!(vehicle_type_id = %vehicle_type_id, "Vehicle type deleted");
    Ok(StatusCode::NO_CONTENT)
}
