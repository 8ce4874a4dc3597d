//! Maintenance scheduling models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vehicle whose day count matched a configured threshold this cycle.
///
/// Never persisted; recomputed on every evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueNotice {
    pub vehicle_id: Uuid,
    pub vehicle_number: String,
    pub maintenance_date: NaiveDate,
    pub days_until: i64,
}

/// Maintenance status shown on the maintenance calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// No maintenance date set.
    NotScheduled,
    /// Maintenance date has passed.
    Overdue,
    /// Due within the next seven days (including today).
    DueThisWeek,
    OnSchedule,
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceStatus::NotScheduled => write!(f, "not_scheduled"),
            MaintenanceStatus::Overdue => write!(f, "overdue"),
            MaintenanceStatus::DueThisWeek => write!(f, "due_this_week"),
            MaintenanceStatus::OnSchedule => write!(f, "on_schedule"),
        }
    }
}

/// One row of the maintenance calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCalendarEntry {
    pub vehicle_id: Uuid,
    pub vehicle_number: String,
    pub platoon_id: Option<Uuid>,
    pub platoon_name: Option<String>,
    pub maintenance_date: Option<NaiveDate>,
    pub days_until: Option<i64>,
    pub status: MaintenanceStatus,
}

/// Response payload for the maintenance calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCalendarResponse {
    pub today: NaiveDate,
    pub entries: Vec<MaintenanceCalendarEntry>,
    pub overdue: usize,
    pub due_this_week: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_status_display() {
        assert_eq!(MaintenanceStatus::NotScheduled.to_string(), "not_scheduled");
        assert_eq!(MaintenanceStatus::Overdue.to_string(), "overdue");
        assert_eq!(MaintenanceStatus::DueThisWeek.to_string(), "due_this_week");
        assert_eq!(MaintenanceStatus::OnSchedule.to_string(), "on_schedule");
    }

    #[test]
    fn test_maintenance_status_serialization() {
        let json = serde_json::to_string(&MaintenanceStatus::DueThisWeek).unwrap();
        assert_eq!(json, "\"due_this_week\"");
    }

    #[test]
    fn test_due_notice_serialization() {
        let notice = DueNotice {
            vehicle_id: Uuid::nil(),
            vehicle_number: "123-45-678".to_string(),
            maintenance_date: NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
            days_until: 1,
        };
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains("\"maintenanceDate\":\"2024-06-11\""));
        assert!(json.contains("\"daysUntil\":1"));
    }
}
