//! Read seams over the vehicle directory and the settings store.

use std::sync::RwLock;

use thiserror::Error;

use crate::models::{NotificationSettings, Vehicle};

/// Errors raised while reading the directory or reading and saving settings.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Source of the vehicle snapshot for a cycle.
#[async_trait::async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, DirectoryError>;
}

/// Store of the notification settings record.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the settings, falling back to defaults when none were saved.
    async fn load_settings(&self) -> Result<NotificationSettings, DirectoryError>;

    /// Replaces the stored settings and returns them as saved.
    async fn save_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, DirectoryError>;
}

/// Vehicle directory held in memory.
#[derive(Debug, Default)]
pub struct InMemoryVehicleDirectory {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleDirectory {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    /// Replaces the stored vehicles.
    pub fn replace(&self, vehicles: Vec<Vehicle>) {
        if let Ok(mut stored) = self.vehicles.write() {
            *stored = vehicles;
        }
    }
}

#[async_trait::async_trait]
impl VehicleDirectory for InMemoryVehicleDirectory {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, DirectoryError> {
        self.vehicles
            .read()
            .map(|v| v.clone())
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}

/// Settings store held in memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<NotificationSettings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Replaces the stored settings.
    pub fn replace(&self, settings: NotificationSettings) {
        if let Ok(mut stored) = self.settings.write() {
            *stored = settings;
        }
    }
}

#[async_trait::async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load_settings(&self) -> Result<NotificationSettings, DirectoryError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }

    async fn save_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, DirectoryError> {
        let mut stored = self
            .settings
            .write()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        *stored = settings.clone();
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_settings_default() {
        let store = InMemorySettingsStore::default();
        let settings = store.load_settings().await.unwrap();
        assert_eq!(settings, NotificationSettings::default());
    }

    #[tokio::test]
    async fn test_in_memory_settings_replace() {
        let store = InMemorySettingsStore::default();
        let mut settings = NotificationSettings::default();
        settings.email_enabled = true;
        store.replace(settings.clone());
        assert_eq!(store.load_settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_in_memory_settings_save_returns_saved() {
        let store = InMemorySettingsStore::default();
        let mut settings = NotificationSettings::default();
        settings.sms_enabled = true;
        settings.recipient_phone = "+972501234567".to_string();

        let saved = store.save_settings(&settings).await.unwrap();
        assert_eq!(saved, settings);
        assert!(store.load_settings().await.unwrap().sms_enabled);
    }

    #[tokio::test]
    async fn test_in_memory_directory_replace() {
        let directory = InMemoryVehicleDirectory::new(Vec::new());
        assert!(directory.list_vehicles().await.unwrap().is_empty());
        directory.replace(Vec::new());
        assert!(directory.list_vehicles().await.unwrap().is_empty());
    }
}
