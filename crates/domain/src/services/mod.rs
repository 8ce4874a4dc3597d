//! Domain services for fleet maintenance reminders.
//!
//! Services contain business logic that operates on domain models.

pub mod clock;
pub mod delivery_ledger;
pub mod directory;
pub mod dispatcher;
pub mod due_date;
pub mod notification;
pub mod reminder_message;
pub mod vehicle_query;

pub use clock::{Clock, FixedClock, SystemClock};
pub use delivery_ledger::{
    DeliveryKey, DeliveryLedger, InMemoryDeliveryLedger, LedgerError, NoopDeliveryLedger,
};
pub use directory::{
    DirectoryError, InMemorySettingsStore, InMemoryVehicleDirectory, SettingsStore,
    VehicleDirectory,
};
pub use dispatcher::{DeliveryOutcome, DispatchReport, NotificationDispatcher};
pub use due_date::{days_until, due_notices, evaluate, maintenance_calendar, maintenance_status};
pub use notification::{
    Channel, ChannelError, EmailChannel, EmailMessage, MockEmailChannel, MockSmsChannel,
    NotificationResult, SmsChannel, SmsMessage,
};
pub use reminder_message::{Locale, ReminderMessage};
