//! SMS channel for maintenance reminders.
//!
//! Supports multiple SMS providers:
//! - `console`: Logs messages to console (development)
//! - `twilio`: Uses the Twilio Messages API

use std::sync::Arc;
use std::time::Duration;

use domain::models::SmsCredentials;
use domain::services::{ChannelError, SmsChannel, SmsMessage};
use tracing::{error, info};

use crate::config::SmsConfig;

/// SMS service implementing the reminder SMS channel.
#[derive(Clone)]
pub struct SmsService {
    config: Arc<SmsConfig>,
    client: reqwest::Client,
}

impl SmsService {
    /// Creates a new SmsService with the given configuration.
    pub fn new(config: SmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build SMS HTTP client; using defaults");
                reqwest::Client::new()
            });

        Self {
            config: Arc::new(config),
            client,
        }
    }

    async fn send_console(
        &self,
        credentials: &SmsCredentials,
        message: SmsMessage,
    ) -> Result<(), ChannelError> {
        info!(
            to = %message.to,
            from = %credentials.from_number,
            body = %message.body,
            "SMS (console provider)"
        );
        Ok(())
    }

    /// Twilio provider - form POST to the account's Messages resource.
    async fn send_twilio(
        &self,
        credentials: &SmsCredentials,
        message: SmsMessage,
    ) -> Result<(), ChannelError> {
        let account_sid = credentials.account_sid.trim();
        if account_sid.is_empty() || credentials.auth_token.trim().is_empty() {
            return Err(ChannelError::NotConfigured(
                "Twilio credentials are incomplete".to_string(),
            ));
        }

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            account_sid
        );

        let form = [
            ("To", message.to.as_str()),
            ("From", credentials.from_number.trim()),
            ("Body", message.body.as_str()),
        ];

        let response = self
            .client
            .post(url)
            .basic_auth(account_sid, Some(credentials.auth_token.trim()))
            .form(&form)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed(format!("Twilio request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %message.to, "SMS sent via Twilio");
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_body, "Twilio API error");
            Err(ChannelError::Provider {
                status: status.as_u16(),
                message: error_body,
            })
        }
    }
}

#[async_trait::async_trait]
impl SmsChannel for SmsService {
    async fn send_sms(
        &self,
        credentials: &SmsCredentials,
        message: SmsMessage,
    ) -> Result<(), ChannelError> {
        match self.config.provider.as_str() {
            "console" => self.send_console(credentials, message).await,
            "twilio" => self.send_twilio(credentials, message).await,
            provider => {
                error!(provider = %provider, "Unknown SMS provider");
                Err(ChannelError::NotConfigured(format!(
                    "Unknown SMS provider: {}",
                    provider
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Form, Router,
    };
    use std::collections::HashMap;

    fn test_config(provider: &str, api_base_url: &str) -> SmsConfig {
        SmsConfig {
            provider: provider.to_string(),
            api_base_url: api_base_url.to_string(),
            timeout_ms: 2000,
        }
    }

    fn credentials() -> SmsCredentials {
        SmsCredentials {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15005550006".to_string(),
        }
    }

    fn message() -> SmsMessage {
        SmsMessage {
            to: "+972501234567".to_string(),
            body: "Vehicle V1 due 2024-06-11".to_string(),
        }
    }

    async fn spawn_provider(status: StatusCode) -> String {
        let app = Router::new().route(
            "/2010-04-01/Accounts/:sid/Messages.json",
            post(
                move |Path(sid): Path<String>,
                      headers: HeaderMap,
                      Form(form): Form<HashMap<String, String>>| async move {
                    assert_eq!(sid, "AC123");
                    assert!(headers.contains_key("authorization"));
                    assert_eq!(form["To"], "+972501234567");
                    assert_eq!(form["From"], "+15005550006");
                    (status, "twilio says hi")
                },
            ),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_send_console_sms() {
        let service = SmsService::new(test_config("console", ""));
        assert!(service.send_sms(&credentials(), message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_twilio_requires_credentials() {
        let service = SmsService::new(test_config("twilio", "http://127.0.0.1:1"));
        let result = service
            .send_sms(&SmsCredentials::default(), message())
            .await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_twilio_created() {
        let base = spawn_provider(StatusCode::CREATED).await;
        let service = SmsService::new(test_config("twilio", &base));
        assert!(service.send_sms(&credentials(), message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_twilio_rejected() {
        let base = spawn_provider(StatusCode::BAD_REQUEST).await;
        let service = SmsService::new(test_config("twilio", &base));
        let result = service.send_sms(&credentials(), message()).await;
        assert!(matches!(result, Err(ChannelError::Provider { status: 400, .. })));
    }
}
