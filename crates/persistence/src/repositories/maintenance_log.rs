//! Maintenance log repository.

use chrono::Utc;
use domain::models::CreateMaintenanceLogRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MaintenanceLogEntity;
use crate::metrics::QueryTimer;

/// Repository for maintenance log entries.
#[derive(Clone)]
pub struct MaintenanceLogRepository {
    pool: PgPool,
}

impl MaintenanceLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry to a vehicle's log.
    pub async fn append(
        &self,
        vehicle_id: Uuid,
        request: &CreateMaintenanceLogRequest,
    ) -> Result<MaintenanceLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("append_maintenance_log");
        let author = request
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());
        let result = sqlx::query_as::<_, MaintenanceLogEntity>(
            r#"
            INSERT INTO maintenance_logs (id, vehicle_id, author, notes, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, vehicle_id, author, notes, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(author)
        .bind(request.notes.trim())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Entries for a vehicle, newest first.
    pub async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_maintenance_logs_by_vehicle");
        let result = sqlx::query_as::<_, MaintenanceLogEntity>(
            r#"
            SELECT id, vehicle_id, author, notes, created_at
            FROM maintenance_logs
            WHERE vehicle_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
