//! Domain layer for the fleet maintenance backend.
//!
//! This crate contains:
//! - Domain models (Vehicle, NotificationSettings, DueNotice)
//! - The maintenance reminder engine (evaluator, dispatcher, delivery ledger)
//! - Channel and data-source traits implemented by the outer crates

pub mod models;
pub mod services;
