//! Shared utilities for the fleet maintenance backend.
//!
//! This crate provides functionality used across the other crates:
//! - Common validation logic for request payloads and settings

pub mod validation;
