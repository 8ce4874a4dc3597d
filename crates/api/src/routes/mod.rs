//! HTTP route handlers.

pub mod fleet_units;
pub mod health;
pub mod maintenance;
pub mod maintenance_logs;
pub mod notification_settings;
pub mod reminders;
pub mod vehicles;
