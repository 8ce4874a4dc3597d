//! Notification settings domain model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Threshold days used when no settings record has been saved yet.
pub const DEFAULT_THRESHOLD_DAYS: [i64; 2] = [1, 2];

/// Credentials for the email provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCredentials {
    pub api_key: String,
}

impl EmailCredentials {
    fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Credentials for the SMS provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl SmsCredentials {
    fn is_complete(&self) -> bool {
        !self.account_sid.trim().is_empty()
            && !self.auth_token.trim().is_empty()
            && !self.from_number.trim().is_empty()
    }
}

/// Notification configuration for maintenance reminders.
///
/// A channel is only usable when it is enabled and both its recipient and
/// its provider credentials are non-empty; otherwise it is skipped for the
/// cycle without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub recipient_email: String,
    pub recipient_phone: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    /// Day counts before maintenance at which a reminder fires.
    pub threshold_days: BTreeSet<i64>,
    pub email_credentials: EmailCredentials,
    pub sms_credentials: SmsCredentials,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            recipient_email: String::new(),
            recipient_phone: String::new(),
            email_enabled: false,
            sms_enabled: false,
            threshold_days: DEFAULT_THRESHOLD_DAYS.into_iter().collect(),
            email_credentials: EmailCredentials::default(),
            sms_credentials: SmsCredentials::default(),
            updated_at: None,
        }
    }
}

/// A validated email delivery target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTarget {
    pub recipient: String,
    pub credentials: EmailCredentials,
}

/// A validated SMS delivery target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsTarget {
    pub recipient: String,
    pub credentials: SmsCredentials,
}

impl NotificationSettings {
    /// Whether at least one channel is switched on.
    ///
    /// Drives the scheduling loop: with both channels off no timer is armed.
    pub fn any_channel_enabled(&self) -> bool {
        self.email_enabled || self.sms_enabled
    }

    /// Returns the email target if the channel is enabled and fully configured.
    pub fn email_target(&self) -> Option<EmailTarget> {
        let recipient = self.recipient_email.trim();
        if !self.email_enabled || recipient.is_empty() || !self.email_credentials.is_complete() {
            return None;
        }
        Some(EmailTarget {
            recipient: recipient.to_string(),
            credentials: self.email_credentials.clone(),
        })
    }

    /// Returns the SMS target if the channel is enabled and fully configured.
    pub fn sms_target(&self) -> Option<SmsTarget> {
        let recipient = self.recipient_phone.trim();
        if !self.sms_enabled || recipient.is_empty() || !self.sms_credentials.is_complete() {
            return None;
        }
        Some(SmsTarget {
            recipient: recipient.to_string(),
            credentials: self.sms_credentials.clone(),
        })
    }
}

/// Request payload for updating the notification settings.
///
/// Credential fields left out of the request keep their stored value so the
/// client never has to echo secrets back.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationSettingsRequest {
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_optional_email"))]
    pub recipient_email: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub recipient_phone: String,

    pub email_enabled: bool,

    pub sms_enabled: bool,

    #[validate(custom(function = "shared::validation::validate_threshold_days"))]
    pub threshold_days: Vec<i32>,

    pub email_api_key: Option<String>,
    pub sms_account_sid: Option<String>,
    pub sms_auth_token: Option<String>,
    pub sms_from_number: Option<String>,
}

impl UpdateNotificationSettingsRequest {
    /// Merges this request over the currently stored settings.
    pub fn apply_to(self, current: &NotificationSettings) -> NotificationSettings {
        let mut email_credentials = current.email_credentials.clone();
        if let Some(api_key) = self.email_api_key {
            email_credentials.api_key = api_key;
        }

        let mut sms_credentials = current.sms_credentials.clone();
        if let Some(sid) = self.sms_account_sid {
            sms_credentials.account_sid = sid;
        }
        if let Some(token) = self.sms_auth_token {
            sms_credentials.auth_token = token;
        }
        if let Some(from) = self.sms_from_number {
            sms_credentials.from_number = from;
        }

        NotificationSettings {
            recipient_email: self.recipient_email.trim().to_string(),
            recipient_phone: self.recipient_phone.trim().to_string(),
            email_enabled: self.email_enabled,
            sms_enabled: self.sms_enabled,
            threshold_days: self.threshold_days.into_iter().map(i64::from).collect(),
            email_credentials,
            sms_credentials,
            updated_at: current.updated_at,
        }
    }
}

/// Notification settings as returned to clients, with secrets redacted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsResponse {
    pub recipient_email: String,
    pub recipient_phone: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub threshold_days: Vec<i64>,
    pub email_provider_configured: bool,
    pub sms_provider_configured: bool,
    /// Channels that would actually send on the next cycle.
    pub active_channels: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&NotificationSettings> for NotificationSettingsResponse {
    fn from(settings: &NotificationSettings) -> Self {
        let mut active_channels = Vec::new();
        if settings.email_target().is_some() {
            active_channels.push("email".to_string());
        }
        if settings.sms_target().is_some() {
            active_channels.push("sms".to_string());
        }

        Self {
            recipient_email: settings.recipient_email.clone(),
            recipient_phone: settings.recipient_phone.clone(),
            email_enabled: settings.email_enabled,
            sms_enabled: settings.sms_enabled,
            threshold_days: settings.threshold_days.iter().copied().collect(),
            email_provider_configured: settings.email_credentials.is_complete(),
            sms_provider_configured: settings.sms_credentials.is_complete(),
            active_channels,
            updated_at: settings.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> NotificationSettings {
        NotificationSettings {
            recipient_email: "fleet@example.com".to_string(),
            recipient_phone: "972501234567".to_string(),
            email_enabled: true,
            sms_enabled: true,
            email_credentials: EmailCredentials {
                api_key: "SG.key".to_string(),
            },
            sms_credentials: SmsCredentials {
                account_sid: "AC123".to_string(),
                auth_token: "token".to_string(),
                from_number: "+15005550006".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = NotificationSettings::default();
        assert!(!settings.any_channel_enabled());
        assert_eq!(
            settings.threshold_days.iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(settings.email_target().is_none());
        assert!(settings.sms_target().is_none());
    }

    #[test]
    fn test_targets_when_fully_configured() {
        let settings = configured();
        let email = settings.email_target().unwrap();
        assert_eq!(email.recipient, "fleet@example.com");
        let sms = settings.sms_target().unwrap();
        assert_eq!(sms.credentials.account_sid, "AC123");
    }

    #[test]
    fn test_email_target_missing_recipient() {
        let mut settings = configured();
        settings.recipient_email = "  ".to_string();
        assert!(settings.email_enabled);
        assert!(settings.email_target().is_none());
        assert!(settings.sms_target().is_some());
    }

    #[test]
    fn test_email_target_missing_api_key() {
        let mut settings = configured();
        settings.email_credentials.api_key = String::new();
        assert!(settings.email_target().is_none());
    }

    #[test]
    fn test_sms_target_requires_every_credential() {
        let mut settings = configured();
        settings.sms_credentials.from_number = String::new();
        assert!(settings.sms_target().is_none());
    }

    #[test]
    fn test_disabled_channel_has_no_target() {
        let mut settings = configured();
        settings.sms_enabled = false;
        assert!(settings.sms_target().is_none());
        assert!(settings.any_channel_enabled());
    }

    #[test]
    fn test_update_request_keeps_omitted_credentials() {
        let current = configured();
        let json = r#"{
            "recipientEmail": " ops@example.com ",
            "recipientPhone": "",
            "emailEnabled": true,
            "smsEnabled": false,
            "thresholdDays": [3, 1, 3]
        }"#;
        let request: UpdateNotificationSettingsRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());

        let updated = request.apply_to(&current);
        assert_eq!(updated.recipient_email, "ops@example.com");
        assert_eq!(updated.email_credentials.api_key, "SG.key");
        assert_eq!(updated.sms_credentials, current.sms_credentials);
        assert_eq!(updated.threshold_days.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_update_request_rejects_bad_phone() {
        let json = r#"{
            "recipientPhone": "call me",
            "emailEnabled": false,
            "smsEnabled": true,
            "thresholdDays": [1]
        }"#;
        let request: UpdateNotificationSettingsRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_redacts_credentials() {
        let response = NotificationSettingsResponse::from(&configured());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("SG.key"));
        assert!(!json.contains("token"));
        assert!(json.contains("\"emailProviderConfigured\":true"));
        assert_eq!(response.active_channels, vec!["email", "sms"]);
    }
}
