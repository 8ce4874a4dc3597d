//! Notification dispatcher for maintenance reminders.
//!
//! Turns a vehicle snapshot and a settings snapshot into channel sends.
//! Every send of a cycle runs concurrently and is settled independently:
//! a failing or slow send never prevents the others from completing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::{join_all, BoxFuture, FutureExt};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DueNotice, NotificationSettings, Vehicle};

use super::delivery_ledger::{DeliveryKey, DeliveryLedger, NoopDeliveryLedger};
use super::due_date::due_notices;
use super::notification::{
    Channel, ChannelError, EmailChannel, NotificationResult, SmsChannel,
};
use super::reminder_message::{Locale, ReminderMessage};

/// Outcome of one reminder on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub vehicle_id: Uuid,
    pub vehicle_number: String,
    pub channel: Channel,
    pub days_until: i64,
    #[serde(flatten)]
    pub result: NotificationResult,
}

/// Summary of one dispatch cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub today: NaiveDate,
    pub vehicles_evaluated: usize,
    pub notices: Vec<DueNotice>,
    pub outcomes: Vec<DeliveryOutcome>,
    pub sent: usize,
    pub failed: usize,
    pub already_delivered: usize,
}

impl DispatchReport {
    pub fn new(
        today: NaiveDate,
        vehicles_evaluated: usize,
        notices: Vec<DueNotice>,
        outcomes: Vec<DeliveryOutcome>,
    ) -> Self {
        let count = |label: &str| outcomes.iter().filter(|o| o.result.as_str() == label).count();
        let sent = count("sent");
        let failed = count("failed");
        let already_delivered = count("already_delivered");
        Self {
            today,
            vehicles_evaluated,
            notices,
            outcomes,
            sent,
            failed,
            already_delivered,
        }
    }

    /// Report for a cycle that did not evaluate anything.
    pub fn empty(today: NaiveDate) -> Self {
        Self::new(today, 0, Vec::new(), Vec::new())
    }

    /// Outcomes for one channel.
    pub fn for_channel(&self, channel: Channel) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes.iter().filter(move |o| o.channel == channel)
    }
}

/// Sends maintenance reminders through the enabled channels.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailChannel>,
    sms: Arc<dyn SmsChannel>,
    ledger: Arc<dyn DeliveryLedger>,
    send_timeout: Option<Duration>,
    locale: Locale,
}

impl NotificationDispatcher {
    /// Creates a dispatcher without deduplication or send timeout.
    pub fn new(email: Arc<dyn EmailChannel>, sms: Arc<dyn SmsChannel>) -> Self {
        Self {
            email,
            sms,
            ledger: Arc::new(NoopDeliveryLedger),
            send_timeout: None,
            locale: Locale::default(),
        }
    }

    /// Consults and updates the given ledger around every send.
    pub fn with_ledger(mut self, ledger: Arc<dyn DeliveryLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Bounds every send. `None` or a zero duration disables the bound.
    pub fn with_send_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.send_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Evaluates the vehicles against the thresholds and sends reminders.
    ///
    /// Channels that are disabled or missing a recipient or credentials are
    /// skipped without producing an outcome. Send failures are reported in
    /// the returned outcomes and never propagated.
    pub async fn dispatch(
        &self,
        today: NaiveDate,
        vehicles: &[Vehicle],
        settings: &NotificationSettings,
    ) -> DispatchReport {
        let notices = due_notices(today, vehicles, &settings.threshold_days);
        let email_target = settings.email_target();
        let sms_target = settings.sms_target();

        if settings.email_enabled && email_target.is_none() {
            tracing::debug!("Email channel enabled but not configured; skipping");
        }
        if settings.sms_enabled && sms_target.is_none() {
            tracing::debug!("SMS channel enabled but not configured; skipping");
        }

        let mut sends: Vec<BoxFuture<'_, DeliveryOutcome>> = Vec::new();
        for notice in &notices {
            let message = ReminderMessage::render(notice, self.locale);

            if let Some(target) = &email_target {
                let email = message.email(&target.recipient);
                let send = self.email.send_email(&target.credentials, email);
                sends.push(self.deliver(today, notice, Channel::Email, send).boxed());
            }

            if let Some(target) = &sms_target {
                let sms = message.sms(&target.recipient);
                let send = self.sms.send_sms(&target.credentials, sms);
                sends.push(self.deliver(today, notice, Channel::Sms, send).boxed());
            }
        }

        let outcomes = join_all(sends).await;
        let report = DispatchReport::new(today, vehicles.len(), notices, outcomes);

        tracing::info!(
            today = %today,
            vehicles = report.vehicles_evaluated,
            due = report.notices.len(),
            sent = report.sent,
            failed = report.failed,
            already_delivered = report.already_delivered,
            "Maintenance reminder dispatch completed"
        );

        report
    }

    async fn deliver<F>(
        &self,
        today: NaiveDate,
        notice: &DueNotice,
        channel: Channel,
        send: F,
    ) -> DeliveryOutcome
    where
        F: Future<Output = Result<(), ChannelError>> + Send,
    {
        let key = DeliveryKey {
            vehicle_id: notice.vehicle_id,
            channel,
            maintenance_date: notice.maintenance_date,
            days_until: notice.days_until,
        };
        let outcome = |result| DeliveryOutcome {
            vehicle_id: notice.vehicle_id,
            vehicle_number: notice.vehicle_number.clone(),
            channel,
            days_until: notice.days_until,
            result,
        };

        match self.ledger.is_delivered(&key).await {
            Ok(true) => {
                tracing::debug!(
                    vehicle_number = %notice.vehicle_number,
                    channel = %channel,
                    days_until = notice.days_until,
                    "Reminder already delivered; skipping"
                );
                return outcome(NotificationResult::AlreadyDelivered);
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, channel = %channel, "Delivery ledger lookup failed");
            }
        }

        let result = match self.send_timeout {
            Some(limit) => match tokio::time::timeout(limit, send).await {
                Ok(result) => result,
                Err(_) => Err(ChannelError::Timeout(limit.as_millis() as u64)),
            },
            None => send.await,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    vehicle_number = %notice.vehicle_number,
                    channel = %channel,
                    days_until = notice.days_until,
                    "Maintenance reminder sent"
                );
                if let Err(e) = self.ledger.record(&key, today).await {
                    tracing::warn!(error = %e, channel = %channel, "Failed to record delivery");
                }
                outcome(NotificationResult::Sent)
            }
            Err(e) => {
                tracing::warn!(
                    vehicle_number = %notice.vehicle_number,
                    channel = %channel,
                    error = %e,
                    "Failed to send maintenance reminder"
                );
                outcome(NotificationResult::Failed(e.to_string()))
            }
        }
    }
}
