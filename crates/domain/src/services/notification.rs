//! Notification channels for maintenance reminders.
//!
//! Provides the email and SMS channel abstractions the dispatcher sends
//! through, plus recording mocks for development and testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EmailCredentials, SmsCredentials};

/// Delivery channel enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Channel::Email),
            "sms" => Some(Channel::Sms),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a channel send attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to send: {0}")]
    SendFailed(String),

    #[error("Provider rejected message ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Send timed out after {0} ms")]
    Timeout(u64),
}

/// An email reminder ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
}

/// An SMS reminder ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Result of a reminder delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum NotificationResult {
    /// Reminder was handed to the provider successfully.
    Sent,
    /// Same reminder was already delivered earlier; nothing sent.
    AlreadyDelivered,
    /// Sending failed (but was non-blocking).
    Failed(String),
}

impl NotificationResult {
    /// Label used for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationResult::Sent => "sent",
            NotificationResult::AlreadyDelivered => "already_delivered",
            NotificationResult::Failed(_) => "failed",
        }
    }
}

/// Email channel trait.
#[async_trait::async_trait]
pub trait EmailChannel: Send + Sync {
    /// Send one email using the given provider credentials.
    async fn send_email(
        &self,
        credentials: &EmailCredentials,
        message: EmailMessage,
    ) -> Result<(), ChannelError>;
}

/// SMS channel trait.
#[async_trait::async_trait]
pub trait SmsChannel: Send + Sync {
    /// Send one SMS using the given provider credentials.
    async fn send_sms(
        &self,
        credentials: &SmsCredentials,
        message: SmsMessage,
    ) -> Result<(), ChannelError>;
}

/// Behaviour knobs shared by the mock channels.
#[derive(Debug, Clone, Default)]
struct MockBehaviour {
    simulate_failure: bool,
    fail_for: Option<String>,
    delay: Option<Duration>,
}

impl MockBehaviour {
    async fn attempt(&self, recipient: &str) -> Result<(), ChannelError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.simulate_failure || self.fail_for.as_deref() == Some(recipient) {
            return Err(ChannelError::SendFailed("Simulated failure".to_string()));
        }
        Ok(())
    }
}

/// Mock email channel for development and testing.
///
/// Records every successful send instead of contacting a provider.
#[derive(Debug, Clone, Default)]
pub struct MockEmailChannel {
    behaviour: MockBehaviour,
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    attempts: Arc<Mutex<usize>>,
}

impl MockEmailChannel {
    /// Create a new mock email channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock channel that fails every send.
    pub fn failing() -> Self {
        Self {
            behaviour: MockBehaviour {
                simulate_failure: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Fail sends addressed to the given recipient only.
    pub fn failing_for(mut self, recipient: impl Into<String>) -> Self {
        self.behaviour.fail_for = Some(recipient.into());
        self
    }

    /// Wait before completing every send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.behaviour.delay = Some(delay);
        self
    }

    /// Messages sent successfully so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of send attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|a| *a).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl EmailChannel for MockEmailChannel {
    async fn send_email(
        &self,
        _credentials: &EmailCredentials,
        message: EmailMessage,
    ) -> Result<(), ChannelError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            *attempts += 1;
        }

        if let Err(e) = self.behaviour.attempt(&message.to).await {
            tracing::warn!(to = %message.to, "Mock email channel simulating failure");
            return Err(e);
        }

        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Mock: Would send maintenance reminder email"
        );

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }
}

/// Mock SMS channel for development and testing.
#[derive(Debug, Clone, Default)]
pub struct MockSmsChannel {
    behaviour: MockBehaviour,
    sent: Arc<Mutex<Vec<SmsMessage>>>,
    attempts: Arc<Mutex<usize>>,
}

impl MockSmsChannel {
    /// Create a new mock SMS channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock channel that fails every send.
    pub fn failing() -> Self {
        Self {
            behaviour: MockBehaviour {
                simulate_failure: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Fail sends addressed to the given recipient only.
    pub fn failing_for(mut self, recipient: impl Into<String>) -> Self {
        self.behaviour.fail_for = Some(recipient.into());
        self
    }

    /// Wait before completing every send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.behaviour.delay = Some(delay);
        self
    }

    /// Messages sent successfully so far.
    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of send attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|a| *a).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SmsChannel for MockSmsChannel {
    async fn send_sms(
        &self,
        _credentials: &SmsCredentials,
        message: SmsMessage,
    ) -> Result<(), ChannelError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            *attempts += 1;
        }

        if let Err(e) = self.behaviour.attempt(&message.to).await {
            tracing::warn!(to = %message.to, "Mock SMS channel simulating failure");
            return Err(e);
        }

        tracing::info!(to = %message.to, "Mock: Would send maintenance reminder SMS");

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }
}
