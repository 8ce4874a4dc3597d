//! Delivery ledger for reminder idempotency.
//!
//! A reminder is identified by the vehicle, the channel, the maintenance
//! date and the threshold day it fired on. Only successful deliveries are
//! recorded, so a failed send is attempted again on the next cycle.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::notification::Channel;

/// Identity of one reminder delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryKey {
    pub vehicle_id: Uuid,
    pub channel: Channel,
    pub maintenance_date: NaiveDate,
    pub days_until: i64,
}

/// Errors raised by a ledger backend.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger storage error: {0}")]
    Storage(String),
}

/// Record of reminders already delivered.
#[async_trait::async_trait]
pub trait DeliveryLedger: Send + Sync {
    /// Whether a reminder with this key was already delivered.
    async fn is_delivered(&self, key: &DeliveryKey) -> Result<bool, LedgerError>;

    /// Records a successful delivery. Recording an existing key is a no-op.
    async fn record(&self, key: &DeliveryKey, delivered_on: NaiveDate) -> Result<(), LedgerError>;
}

/// Process-local ledger. Forgets everything on restart.
#[derive(Debug, Default)]
pub struct InMemoryDeliveryLedger {
    delivered: Mutex<HashSet<DeliveryKey>>,
}

impl InMemoryDeliveryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded deliveries.
    pub fn len(&self) -> usize {
        self.delivered.lock().map(|d| d.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl DeliveryLedger for InMemoryDeliveryLedger {
    async fn is_delivered(&self, key: &DeliveryKey) -> Result<bool, LedgerError> {
        let delivered = self
            .delivered
            .lock()
            .map_err(|e| LedgerError::Storage(e.to_string()))?;
        Ok(delivered.contains(key))
    }

    async fn record(&self, key: &DeliveryKey, _delivered_on: NaiveDate) -> Result<(), LedgerError> {
        let mut delivered = self
            .delivered
            .lock()
            .map_err(|e| LedgerError::Storage(e.to_string()))?;
        delivered.insert(key.clone());
        Ok(())
    }
}

/// Ledger that never remembers anything; every due reminder is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDeliveryLedger;

#[async_trait::async_trait]
impl DeliveryLedger for NoopDeliveryLedger {
    async fn is_delivered(&self, _key: &DeliveryKey) -> Result<bool, LedgerError> {
        Ok(false)
    }

    async fn record(&self, _key: &DeliveryKey, _delivered_on: NaiveDate) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(channel: Channel, days_until: i64) -> DeliveryKey {
        DeliveryKey {
            vehicle_id: Uuid::nil(),
            channel,
            maintenance_date: NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
            days_until,
        }
    }

    #[tokio::test]
    async fn test_in_memory_ledger_records() {
        let ledger = InMemoryDeliveryLedger::new();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(!ledger.is_delivered(&key(Channel::Email, 1)).await.unwrap());

        ledger.record(&key(Channel::Email, 1), today).await.unwrap();
        ledger.record(&key(Channel::Email, 1), today).await.unwrap();

        assert!(ledger.is_delivered(&key(Channel::Email, 1)).await.unwrap());
        assert!(!ledger.is_delivered(&key(Channel::Sms, 1)).await.unwrap());
        assert!(!ledger.is_delivered(&key(Channel::Email, 2)).await.unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_noop_ledger_never_delivered() {
        let ledger = NoopDeliveryLedger;
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        ledger.record(&key(Channel::Sms, 2), today).await.unwrap();
        assert!(!ledger.is_delivered(&key(Channel::Sms, 2)).await.unwrap());
    }
}
