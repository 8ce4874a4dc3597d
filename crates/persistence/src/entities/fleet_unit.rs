//! Platoon and vehicle type entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Platoon, VehicleType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the platoons table.
#[derive(Debug, Clone, FromRow)]
pub struct PlatoonEntity {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PlatoonEntity> for Platoon {
    fn from(entity: PlatoonEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location: entity.location,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the vehicle_types table.
#[derive(Debug, Clone, FromRow)]
pub struct VehicleTypeEntity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleTypeEntity> for VehicleType {
    fn from(entity: VehicleTypeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}
