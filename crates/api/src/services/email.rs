//! Email channel for maintenance reminders.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `sendgrid`: Uses the SendGrid v3 mail/send API

use std::sync::Arc;
use std::time::Duration;

use domain::models::EmailCredentials;
use domain::services::{ChannelError, EmailChannel, EmailMessage};
use tracing::{debug, error, info};

use crate::config::EmailConfig;

/// Email service implementing the reminder email channel.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build email HTTP client; using defaults");
                reqwest::Client::new()
            });

        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Console provider - logs email to console (for development).
    async fn send_console(&self, message: EmailMessage) -> Result<(), ChannelError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        info!(body_text = %message.body_text, "Email body (plain text)");

        if let Some(html) = &message.body_html {
            debug!(body_html_length = html.len(), "Email body (HTML)");
        }

        Ok(())
    }

    /// Request body for the SendGrid mail/send endpoint.
    fn sendgrid_payload(&self, message: &EmailMessage) -> serde_json::Value {
        let mut content = vec![serde_json::json!({
            "type": "text/plain",
            "value": message.body_text
        })];

        if let Some(html) = &message.body_html {
            content.push(serde_json::json!({
                "type": "text/html",
                "value": html
            }));
        }

        serde_json::json!({
            "personalizations": [{
                "to": [{ "email": message.to }]
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": content
        })
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(
        &self,
        credentials: &EmailCredentials,
        message: EmailMessage,
    ) -> Result<(), ChannelError> {
        if credentials.api_key.trim().is_empty() {
            return Err(ChannelError::NotConfigured(
                "SendGrid API key is empty".to_string(),
            ));
        }

        let url = format!(
            "{}/v3/mail/send",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(credentials.api_key.trim())
            .json(&self.sendgrid_payload(&message))
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %message.to, subject = %message.subject, "Email sent via SendGrid");
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_body, "SendGrid API error");
            Err(ChannelError::Provider {
                status: status.as_u16(),
                message: error_body,
            })
        }
    }
}

#[async_trait::async_trait]
impl EmailChannel for EmailService {
    async fn send_email(
        &self,
        credentials: &EmailCredentials,
        message: EmailMessage,
    ) -> Result<(), ChannelError> {
        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "sendgrid" => self.send_sendgrid(credentials, message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(ChannelError::NotConfigured(format!(
                    "Unknown email provider: {}",
                    provider
                )))
            }
        }
    }
}
