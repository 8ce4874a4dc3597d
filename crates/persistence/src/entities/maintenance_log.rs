//! Maintenance log entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::MaintenanceLog;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the maintenance_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceLogEntity {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub author: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceLogEntity> for MaintenanceLog {
    fn from(entity: MaintenanceLogEntity) -> Self {
        Self {
            id: entity.id,
            vehicle_id: entity.vehicle_id,
            author: entity.author,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_log_entity_to_domain() {
        let entity = MaintenanceLogEntity {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            author: None,
            notes: "Oil change".to_string(),
            created_at: Utc::now(),
        };
        let log: MaintenanceLog = entity.clone().into();
        assert_eq!(log.vehicle_id, entity.vehicle_id);
        assert_eq!(log.notes, "Oil change");
        assert!(log.author.is_none());
    }
}
