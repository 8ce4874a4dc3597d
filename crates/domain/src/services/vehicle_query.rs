//! Filtering and sorting of vehicle listings.

use std::cmp::Ordering;

use crate::models::{ListVehiclesQuery, SortDirection, Vehicle, VehicleSortField};

/// Whether a vehicle passes every filter of the query.
pub fn matches(vehicle: &Vehicle, query: &ListVehiclesQuery) -> bool {
    let number_matches = match query.vehicle_number.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => vehicle
            .vehicle_number
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        _ => true,
    };

    number_matches
        && query
            .vehicle_type_id
            .map_or(true, |id| vehicle.vehicle_type_id == Some(id))
        && query
            .platoon_id
            .map_or(true, |id| vehicle.platoon_id == Some(id))
        && query.status.map_or(true, |s| vehicle.status == s)
        && query
            .classification
            .map_or(true, |c| vehicle.classification == c)
}

/// Orders two vehicles by a field in the given direction.
///
/// Vehicles without a maintenance date sort after every dated vehicle in
/// both directions.
pub fn compare(
    a: &Vehicle,
    b: &Vehicle,
    field: VehicleSortField,
    direction: SortDirection,
) -> Ordering {
    let directed = |ordering: Ordering| match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    match field {
        VehicleSortField::VehicleNumber => directed(
            a.vehicle_number
                .to_lowercase()
                .cmp(&b.vehicle_number.to_lowercase()),
        ),
        VehicleSortField::MaintenanceDate => match (a.maintenance_date, b.maintenance_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        VehicleSortField::Status => directed(a.status.as_str().cmp(b.status.as_str())),
        VehicleSortField::Classification => directed(
            a.classification
                .as_str()
                .cmp(b.classification.as_str()),
        ),
        VehicleSortField::HasFireExtinguisher => {
            directed(a.has_fire_extinguisher.cmp(&b.has_fire_extinguisher))
        }
        VehicleSortField::HasDriverTools => {
            directed(a.has_driver_tools.cmp(&b.has_driver_tools))
        }
    }
}

/// Applies the query's filters and sort order to a vehicle list.
///
/// The sort is stable; ties keep their incoming order.
pub fn apply(mut vehicles: Vec<Vehicle>, query: &ListVehiclesQuery) -> Vec<Vehicle> {
    vehicles.retain(|v| matches(v, query));
    vehicles.sort_by(|a, b| compare(a, b, query.sort_by, query.sort_direction));
    vehicles
}
