//! # blodhund-telemetry
//!
//! Observability for the discovery pipeline:
//! - `logging`: structured logging via `tracing`
//! - `metrics`: prometheus counters for pipeline throughput and probe volume

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
