//! Vehicle repository for database operations.

use chrono::Utc;
use domain::models::{Vehicle, VehicleRequest};
use domain::services::{DirectoryError, VehicleDirectory};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{VehicleClassificationDb, VehicleEntity, VehicleStatusDb};
use crate::metrics::QueryTimer;

const VEHICLE_COLUMNS: &str = "id, vehicle_number, vehicle_type_id, platoon_id, status, \
    classification, has_fire_extinguisher, has_driver_tools, maintenance_date, notes, \
    created_at, updated_at";

/// Repository for vehicle-related database operations.
#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every vehicle in the directory.
    pub async fn list_all(&self) -> Result<Vec<VehicleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_vehicles");
        let result = sqlx::query_as::<_, VehicleEntity>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY vehicle_number"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a vehicle by its id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VehicleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vehicle_by_id");
        let result = sqlx::query_as::<_, VehicleEntity>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a vehicle.
    pub async fn create(&self, request: &VehicleRequest) -> Result<VehicleEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_vehicle");
        let now = Utc::now();
        let result = sqlx::query_as::<_, VehicleEntity>(&format!(
            r#"
            INSERT INTO vehicles (id, vehicle_number, vehicle_type_id, platoon_id, status,
                                  classification, has_fire_extinguisher, has_driver_tools,
                                  maintenance_date, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.vehicle_number.trim())
        .bind(request.vehicle_type_id)
        .bind(request.platoon_id)
        .bind(VehicleStatusDb::from(request.status))
        .bind(VehicleClassificationDb::from(request.classification))
        .bind(request.has_fire_extinguisher)
        .bind(request.has_driver_tools)
        .bind(request.maintenance_date)
        .bind(request.notes.as_deref())
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a vehicle's fields. Returns `None` if the vehicle does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        request: &VehicleRequest,
    ) -> Result<Option<VehicleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_vehicle");
        let result = sqlx::query_as::<_, VehicleEntity>(&format!(
            r#"
            UPDATE vehicles
            SET vehicle_number = $2,
                vehicle_type_id = $3,
                platoon_id = $4,
                status = $5,
                classification = $6,
                has_fire_extinguisher = $7,
                has_driver_tools = $8,
                maintenance_date = $9,
                notes = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.vehicle_number.trim())
        .bind(request.vehicle_type_id)
        .bind(request.platoon_id)
        .bind(VehicleStatusDb::from(request.status))
        .bind(VehicleClassificationDb::from(request.classification))
        .bind(request.has_fire_extinguisher)
        .bind(request.has_driver_tools)
        .bind(request.maintenance_date)
        .bind(request.notes.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a vehicle. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_vehicle");
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl VehicleDirectory for VehicleRepository {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, DirectoryError> {
        let entities = self
            .list_all()
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        Ok(entities.into_iter().map(Vehicle::from).collect())
    }
}
