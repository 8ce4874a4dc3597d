//! Notification settings entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{EmailCredentials, NotificationSettings, SmsCredentials};
use sqlx::FromRow;

/// Primary key of the single settings row.
pub const SETTINGS_ROW_ID: i32 = 1;

/// Database row mapping for the notification_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationSettingsEntity {
    pub id: i32,
    pub recipient_email: String,
    pub recipient_phone: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub threshold_days: Vec<i32>,
    pub email_api_key: String,
    pub sms_account_sid: String,
    pub sms_auth_token: String,
    pub sms_from_number: String,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationSettingsEntity> for NotificationSettings {
    fn from(entity: NotificationSettingsEntity) -> Self {
        Self {
            recipient_email: entity.recipient_email,
            recipient_phone: entity.recipient_phone,
            email_enabled: entity.email_enabled,
            sms_enabled: entity.sms_enabled,
            threshold_days: entity.threshold_days.into_iter().map(i64::from).collect(),
            email_credentials: EmailCredentials {
                api_key: entity.email_api_key,
            },
            sms_credentials: SmsCredentials {
                account_sid: entity.sms_account_sid,
                auth_token: entity.sms_auth_token,
                from_number: entity.sms_from_number,
            },
            updated_at: Some(entity.updated_at),
        }
    }
}
