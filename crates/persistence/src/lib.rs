//! Persistence layer for the fleet maintenance backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repositories for vehicles, notification settings and the delivery ledger

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
