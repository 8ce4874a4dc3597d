//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod trace_id;

pub use metrics::{
    init_metrics, metrics_handler, metrics_middleware, record_reminder_cycle,
    record_reminder_outcomes,
};
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
