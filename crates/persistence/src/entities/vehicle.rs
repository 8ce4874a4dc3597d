//! Vehicle entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Vehicle, VehicleClassification, VehicleStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for vehicle_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
pub enum VehicleStatusDb {
    Operational,
    Limited,
    Disabled,
}

impl From<VehicleStatusDb> for VehicleStatus {
    fn from(status: VehicleStatusDb) -> Self {
        match status {
            VehicleStatusDb::Operational => VehicleStatus::Operational,
            VehicleStatusDb::Limited => VehicleStatus::Limited,
            VehicleStatusDb::Disabled => VehicleStatus::Disabled,
        }
    }
}

impl From<VehicleStatus> for VehicleStatusDb {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::Operational => VehicleStatusDb::Operational,
            VehicleStatus::Limited => VehicleStatusDb::Limited,
            VehicleStatus::Disabled => VehicleStatusDb::Disabled,
        }
    }
}

/// Database enum for vehicle_classification that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "vehicle_classification", rename_all = "lowercase")]
pub enum VehicleClassificationDb {
    Operational,
    Administrative,
}

impl From<VehicleClassificationDb> for VehicleClassification {
    fn from(classification: VehicleClassificationDb) -> Self {
        match classification {
            VehicleClassificationDb::Operational => VehicleClassification::Operational,
            VehicleClassificationDb::Administrative => VehicleClassification::Administrative,
        }
    }
}

impl From<VehicleClassification> for VehicleClassificationDb {
    fn from(classification: VehicleClassification) -> Self {
        match classification {
            VehicleClassification::Operational => VehicleClassificationDb::Operational,
            VehicleClassification::Administrative => VehicleClassificationDb::Administrative,
        }
    }
}

/// Database row mapping for the vehicles table.
#[derive(Debug, Clone, FromRow)]
pub struct VehicleEntity {
    pub id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type_id: Option<Uuid>,
    pub platoon_id: Option<Uuid>,
    pub status: VehicleStatusDb,
    pub classification: VehicleClassificationDb,
    pub has_fire_extinguisher: bool,
    pub has_driver_tools: bool,
    pub maintenance_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VehicleEntity> for Vehicle {
    fn from(entity: VehicleEntity) -> Self {
        Self {
            id: entity.id,
            vehicle_number: entity.vehicle_number,
            vehicle_type_id: entity.vehicle_type_id,
            platoon_id: entity.platoon_id,
            status: entity.status.into(),
            classification: entity.classification.into(),
            has_fire_extinguisher: entity.has_fire_extinguisher,
            has_driver_tools: entity.has_driver_tools,
            maintenance_date: entity.maintenance_date,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_vehicle_entity() -> VehicleEntity {
        VehicleEntity {
            id: Uuid::new_v4(),
            vehicle_number: "123-45-678".to_string(),
            vehicle_type_id: Some(Uuid::new_v4()),
            platoon_id: None,
            status: VehicleStatusDb::Limited,
            classification: VehicleClassificationDb::Administrative,
            has_fire_extinguisher: true,
            has_driver_tools: false,
            maintenance_date: NaiveDate::from_ymd_opt(2024, 6, 11),
            notes: Some("Brake check".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_vehicle_entity_to_domain() {
        let entity = create_test_vehicle_entity();
        let vehicle: Vehicle = entity.clone().into();

        assert_eq!(vehicle.id, entity.id);
        assert_eq!(vehicle.vehicle_number, entity.vehicle_number);
        assert_eq!(vehicle.status, VehicleStatus::Limited);
        assert_eq!(vehicle.classification, VehicleClassification::Administrative);
        assert_eq!(vehicle.maintenance_date, entity.maintenance_date);
        assert_eq!(vehicle.notes.as_deref(), Some("Brake check"));
    }

    #[test]
    fn test_vehicle_entity_optional_fields() {
        let mut entity = create_test_vehicle_entity();
        entity.maintenance_date = None;
        entity.vehicle_type_id = None;

        let vehicle: Vehicle = entity.into();
        assert!(vehicle.maintenance_date.is_none());
        assert!(vehicle.vehicle_type_id.is_none());
    }

    #[test]
    fn test_status_db_round_trip() {
        for status in [
            VehicleStatus::Operational,
            VehicleStatus::Limited,
            VehicleStatus::Disabled,
        ] {
            let db: VehicleStatusDb = status.into();
            assert_eq!(VehicleStatus::from(db), status);
        }
    }
}
