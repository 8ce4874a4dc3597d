//! Platoon and vehicle type repositories.
//!
//! Deleting either sets the reference on its vehicles to null.

use chrono::Utc;
use domain::models::{CreatePlatoonRequest, CreateVehicleTypeRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PlatoonEntity, VehicleTypeEntity};
use crate::metrics::QueryTimer;

/// Repository for platoon database operations.
#[derive(Clone)]
pub struct PlatoonRepository {
    pool: PgPool,
}

impl PlatoonRepository {
    /// Creates a new PlatoonRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every platoon ordered by name.
    pub async fn list_all(&self) -> Result<Vec<PlatoonEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_platoons");
        let result = sqlx::query_as::<_, PlatoonEntity>(
            "SELECT id, name, location, created_at FROM platoons ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a platoon. Names are unique.
    pub async fn create(
        &self,
        request: &CreatePlatoonRequest,
    ) -> Result<PlatoonEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_platoon");
        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());
        let result = sqlx::query_as::<_, PlatoonEntity>(
            r#"
            INSERT INTO platoons (id, name, location, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, location, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(location)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a platoon. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_platoon");
        let result = sqlx::query("DELETE FROM platoons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

/// Repository for vehicle type database operations.
#[derive(Clone)]
pub struct VehicleTypeRepository {
    pool: PgPool,
}

impl VehicleTypeRepository {
    /// Creates a new VehicleTypeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every vehicle type ordered by name.
    pub async fn list_all(&self) -> Result<Vec<VehicleTypeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_vehicle_types");
        let result = sqlx::query_as::<_, VehicleTypeEntity>(
            "SELECT id, name, created_at FROM vehicle_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a vehicle type. Names are unique.
    pub async fn create(
        &self,
        request: &CreateVehicleTypeRequest,
    ) -> Result<VehicleTypeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_vehicle_type");
        let result = sqlx::query_as::<_, VehicleTypeEntity>(
            r#"
            INSERT INTO vehicle_types (id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a vehicle type. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_vehicle_type");
        let result = sqlx::query("DELETE FROM vehicle_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
