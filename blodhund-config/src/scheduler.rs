//! Active-probe scheduling configuration.
//!
//! All thresholds are wall-clock epoch-second comparisons: the re-probe
//! interval throttles each probe kind per address, the stale/gone windows
//! bound the liveness sweep, and the gone window doubles as the offline
//! threshold.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Scheduling thresholds for the discovery scheduler and result aggregator.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SchedulerConfig {
    /// Minimum seconds between probes of one kind against one address.
    #[validate(range(min = 60, max = 7200))]
    #[serde(default = "default_reprobe_interval")]
    pub reprobe_interval_secs: u64,

    /// A device unseen for longer than this is stale enough to ping.
    #[validate(range(min = 60, max = 7200))]
    #[serde(default = "default_stale_window")]
    pub stale_window_secs: u64,

    /// A device unseen for this long is presumed gone: upper liveness-sweep
    /// bound and offline threshold.
    #[validate(range(min = 300, max = 86400))]
    #[serde(default = "default_gone_window")]
    pub gone_window_secs: u64,

    /// Backoff after a crashed discovery cycle (seconds).
    #[validate(range(min = 1, max = 600))]
    #[serde(default = "default_cycle_backoff")]
    pub cycle_backoff_secs: u64,

    /// Pause after an adapter reset before probing (seconds).
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_settle")]
    pub settle_secs: u64,

    /// Pause between aggregator iterations (seconds).
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Result-queue depth that triggers the monitoring warning.
    #[validate(range(min = 1, max = 100000))]
    #[serde(default = "default_warn_depth")]
    pub result_queue_warn_depth: usize,

    /// External tool invoked for the active discovery probe.
    #[validate(custom(function = validation::validate_tool_name))]
    #[serde(default = "default_discovery_tool")]
    pub discovery_tool: String,
}

fn default_reprobe_interval() -> u64 {
    900
}

fn default_stale_window() -> u64 {
    900
}

fn default_gone_window() -> u64 {
    3600
}

fn default_cycle_backoff() -> u64 {
    20
}

fn default_settle() -> u64 {
    1
}

fn default_sweep_interval() -> u64 {
    1
}

fn default_warn_depth() -> usize {
    100
}

fn default_discovery_tool() -> String {
    "test-discovery".into()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reprobe_interval_secs: default_reprobe_interval(),
            stale_window_secs: default_stale_window(),
            gone_window_secs: default_gone_window(),
            cycle_backoff_secs: default_cycle_backoff(),
            settle_secs: default_settle(),
            sweep_interval_secs: default_sweep_interval(),
            result_queue_warn_depth: default_warn_depth(),
            discovery_tool: default_discovery_tool(),
        }
    }
}
