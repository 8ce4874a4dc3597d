//! Maintenance log entries recorded against a vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One entry in a vehicle's maintenance log. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    /// Who performed or recorded the work, as given by the client.
    pub author: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for appending a maintenance log entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceLogRequest {
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub notes: String,

    #[validate(length(max = 100, message = "Author must be at most 100 characters"))]
    pub author: Option<String>,
}

/// Response payload for a vehicle's maintenance log, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMaintenanceLogsResponse {
    pub vehicle_id: Uuid,
    pub logs: Vec<MaintenanceLog>,
    pub total: usize,
}
