//! Domain models for the fleet maintenance backend.

pub mod fleet_unit;
pub mod maintenance;
pub mod maintenance_log;
pub mod notification_settings;
pub mod vehicle;

pub use fleet_unit::{
    CreatePlatoonRequest, CreateVehicleTypeRequest, ListPlatoonsResponse,
    ListVehicleTypesResponse, Platoon, VehicleType,
};
pub use maintenance::{
    DueNotice, MaintenanceCalendarEntry, MaintenanceCalendarResponse, MaintenanceStatus,
};
pub use maintenance_log::{
    CreateMaintenanceLogRequest, ListMaintenanceLogsResponse, MaintenanceLog,
};
pub use notification_settings::{
    EmailCredentials, EmailTarget, NotificationSettings, NotificationSettingsResponse,
    SmsCredentials, SmsTarget, UpdateNotificationSettingsRequest, DEFAULT_THRESHOLD_DAYS,
};
pub use vehicle::{
    ListVehiclesQuery, ListVehiclesResponse, SortDirection, Vehicle, VehicleClassification,
    VehicleRequest, VehicleSortField, VehicleStatus,
};
