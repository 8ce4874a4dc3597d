//! Vehicle domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a vehicle in the fleet directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    /// Display key shown to users and in reminders.
    pub vehicle_number: String,
    pub vehicle_type_id: Option<Uuid>,
    pub platoon_id: Option<Uuid>,
    pub status: VehicleStatus,
    pub classification: VehicleClassification,
    pub has_fire_extinguisher: bool,
    pub has_driver_tools: bool,
    /// Next scheduled maintenance day, if any.
    pub maintenance_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Operational state of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Operational,
    Limited,
    Disabled,
}

impl VehicleStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Operational => "operational",
            VehicleStatus::Limited => "limited",
            VehicleStatus::Disabled => "disabled",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operational" => Some(VehicleStatus::Operational),
            "limited" => Some(VehicleStatus::Limited),
            "disabled" => Some(VehicleStatus::Disabled),
            _ => None,
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Operational
    }
}

/// Usage classification of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClassification {
    Operational,
    Administrative,
}

impl VehicleClassification {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClassification::Operational => "operational",
            VehicleClassification::Administrative => "administrative",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operational" => Some(VehicleClassification::Operational),
            "administrative" => Some(VehicleClassification::Administrative),
            _ => None,
        }
    }
}

impl Default for VehicleClassification {
    fn default() -> Self {
        VehicleClassification::Operational
    }
}

/// Request payload for creating or replacing a vehicle.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(length(max = 32, message = "Vehicle number must be at most 32 characters"))]
    #[validate(custom(function = "shared::validation::validate_vehicle_number"))]
    pub vehicle_number: String,

    pub vehicle_type_id: Option<Uuid>,

    pub platoon_id: Option<Uuid>,

    #[serde(default)]
    pub status: VehicleStatus,

    #[serde(default)]
    pub classification: VehicleClassification,

    #[serde(default)]
    pub has_fire_extinguisher: bool,

    #[serde(default)]
    pub has_driver_tools: bool,

    #[validate(custom(function = "shared::validation::validate_maintenance_date"))]
    pub maintenance_date: Option<NaiveDate>,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Response payload for vehicle listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVehiclesResponse {
    pub vehicles: Vec<Vehicle>,
    pub total: usize,
}

/// Field a vehicle listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehicleSortField {
    #[default]
    VehicleNumber,
    MaintenanceDate,
    Status,
    Classification,
    HasFireExtinguisher,
    HasDriverTools,
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for filtering and sorting the vehicle list.
///
/// `vehicle_number` matches as a case-insensitive substring; the other
/// filters match exactly. Absent filters match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVehiclesQuery {
    pub vehicle_number: Option<String>,
    pub vehicle_type_id: Option<Uuid>,
    pub platoon_id: Option<Uuid>,
    pub status: Option<VehicleStatus>,
    pub classification: Option<VehicleClassification>,
    #[serde(default)]
    pub sort_by: VehicleSortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
}
