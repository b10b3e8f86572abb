//! Structured logging with tracing.
//!
//! Worker lifecycle logs at `info`, queue pops at `debug`, external-tool
//! stderr and worker faults at `error`, malformed results and queue depth
//! at `warn`.

use tracing_subscriber::{fmt, EnvFilter};

pub struct EventLogger;

impl EventLogger {
    /// Initialize the global subscriber; `RUST_LOG` wins over the
    /// configured default filter.
    pub fn init(default_filter: &str) {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_thread_names(true)
            .init()
    }
}
