//! HTTP service and background jobs for fleet maintenance reminders.

pub mod app;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod services;
