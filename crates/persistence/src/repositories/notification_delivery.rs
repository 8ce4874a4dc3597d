//! Notification delivery repository.
//!
//! Persists successful reminder deliveries so that restarts and manual
//! runs do not repeat a reminder already sent.

use chrono::{NaiveDate, Utc};
use domain::services::{DeliveryKey, DeliveryLedger, LedgerError};
use sqlx::PgPool;

use crate::metrics::QueryTimer;

/// Repository for notification delivery records.
#[derive(Clone)]
pub struct NotificationDeliveryRepository {
    pool: PgPool,
}

impl NotificationDeliveryRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a delivery with this key exists.
    pub async fn exists(&self, key: &DeliveryKey) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("notification_delivery_exists");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notification_deliveries
                WHERE vehicle_id = $1 AND channel = $2
                  AND maintenance_date = $3 AND days_until = $4
            )
            "#,
        )
        .bind(key.vehicle_id)
        .bind(key.channel.as_str())
        .bind(key.maintenance_date)
        .bind(key.days_until as i32)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    /// Insert a delivery record. Duplicates are ignored.
    pub async fn insert(
        &self,
        key: &DeliveryKey,
        delivered_on: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("insert_notification_delivery");
        let result = sqlx::query(
            r#"
            INSERT INTO notification_deliveries
                (vehicle_id, channel, maintenance_date, days_until, delivered_on, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (vehicle_id, channel, maintenance_date, days_until) DO NOTHING
            "#,
        )
        .bind(key.vehicle_id)
        .bind(key.channel.as_str())
        .bind(key.maintenance_date)
        .bind(key.days_until as i32)
        .bind(delivered_on)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl DeliveryLedger for NotificationDeliveryRepository {
    async fn is_delivered(&self, key: &DeliveryKey) -> Result<bool, LedgerError> {
        self.exists(key)
            .await
            .map_err(|e| LedgerError::Storage(e.to_string()))
    }

    async fn record(&self, key: &DeliveryKey, delivered_on: NaiveDate) -> Result<(), LedgerError> {
        self.insert(key, delivered_on)
            .await
            .map(|_| ())
            .map_err(|e| LedgerError::Storage(e.to_string()))
    }
}
