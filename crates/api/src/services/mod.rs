//! External service integrations.

pub mod email;
pub mod sms;

pub use email::EmailService;
pub use sms::SmsService;
