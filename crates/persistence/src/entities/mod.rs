//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod fleet_unit;
pub mod maintenance_log;
pub mod notification_settings;
pub mod vehicle;

pub use fleet_unit::{PlatoonEntity, VehicleTypeEntity};
pub use maintenance_log::MaintenanceLogEntity;
pub use notification_settings::{NotificationSettingsEntity, SETTINGS_ROW_ID};
pub use vehicle::{VehicleClassificationDb, VehicleEntity, VehicleStatusDb};
