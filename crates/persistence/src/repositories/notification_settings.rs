//! Notification settings repository.
//!
//! The settings live in a single row; reading before anything was saved
//! yields the default settings.

use chrono::Utc;
use domain::models::NotificationSettings;
use domain::services::{DirectoryError, SettingsStore};
use sqlx::PgPool;

use crate::entities::{NotificationSettingsEntity, SETTINGS_ROW_ID};
use crate::metrics::QueryTimer;

/// Repository for the notification settings record.
#[derive(Clone)]
pub struct NotificationSettingsRepository {
    pool: PgPool,
}

impl NotificationSettingsRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stored settings row, if one was saved.
    pub async fn find(&self) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_notification_settings");
        let result = sqlx::query_as::<_, NotificationSettingsEntity>(
            r#"
            SELECT id, recipient_email, recipient_phone, email_enabled, sms_enabled,
                   threshold_days, email_api_key, sms_account_sid, sms_auth_token,
                   sms_from_number, updated_at
            FROM notification_settings
            WHERE id = $1
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Current settings, or the defaults when none were saved.
    pub async fn get(&self) -> Result<NotificationSettings, sqlx::Error> {
        Ok(self
            .find()
            .await?
            .map(NotificationSettings::from)
            .unwrap_or_default())
    }

    /// Insert or replace the settings row.
    pub async fn upsert(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_notification_settings");
        let threshold_days: Vec<i32> = settings
            .threshold_days
            .iter()
            .filter_map(|d| i32::try_from(*d).ok())
            .collect();

        let result = sqlx::query_as::<_, NotificationSettingsEntity>(
            r#"
            INSERT INTO notification_settings (id, recipient_email, recipient_phone,
                                               email_enabled, sms_enabled, threshold_days,
                                               email_api_key, sms_account_sid, sms_auth_token,
                                               sms_from_number, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                recipient_email = EXCLUDED.recipient_email,
                recipient_phone = EXCLUDED.recipient_phone,
                email_enabled = EXCLUDED.email_enabled,
                sms_enabled = EXCLUDED.sms_enabled,
                threshold_days = EXCLUDED.threshold_days,
                email_api_key = EXCLUDED.email_api_key,
                sms_account_sid = EXCLUDED.sms_account_sid,
                sms_auth_token = EXCLUDED.sms_auth_token,
                sms_from_number = EXCLUDED.sms_from_number,
                updated_at = EXCLUDED.updated_at
            RETURNING id, recipient_email, recipient_phone, email_enabled, sms_enabled,
                      threshold_days, email_api_key, sms_account_sid, sms_auth_token,
                      sms_from_number, updated_at
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(&settings.recipient_email)
        .bind(&settings.recipient_phone)
        .bind(settings.email_enabled)
        .bind(settings.sms_enabled)
        .bind(threshold_days)
        .bind(&settings.email_credentials.api_key)
        .bind(&settings.sms_credentials.account_sid)
        .bind(&settings.sms_credentials.auth_token)
        .bind(&settings.sms_credentials.from_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait::async_trait]
impl SettingsStore for NotificationSettingsRepository {
    async fn load_settings(&self) -> Result<NotificationSettings, DirectoryError> {
        self.get()
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }

    async fn save_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, DirectoryError> {
        self.upsert(settings)
            .await
            .map(NotificationSettings::from)
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}
