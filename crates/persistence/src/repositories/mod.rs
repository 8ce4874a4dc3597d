//! Repository implementations for database operations.

pub mod fleet_unit;
pub mod maintenance_log;
pub mod notification_delivery;
pub mod notification_settings;
pub mod vehicle;

pub use fleet_unit::{PlatoonRepository, VehicleTypeRepository};
pub use maintenance_log::MaintenanceLogRepository;
pub use notification_delivery::NotificationDeliveryRepository;
pub use notification_settings::NotificationSettingsRepository;
pub use vehicle::VehicleRepository;
