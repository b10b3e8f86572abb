//! Trace capture configuration for live and replayed environments.
//!
//! Defines how the monitor trace is produced:
//! - Live capture from a Bluetooth adapter (`btmon`)
//! - File-based replay (plain or xz-compressed)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate, ValidationError};

use crate::validation;

/// The single mode flag the pipeline core consults: replay mode disables
/// all active probing and offline detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Live,
    Replay,
}

/// Trace capture configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[validate(schema(function = validate_replay_file))]
pub struct CaptureConfig {
    /// Capture mode (live, replay).
    #[validate(custom(function = validation::validate_mode))]
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Bluetooth adapter for live capture and active probes.
    #[validate(custom(function = validation::validate_interface))]
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Recorded trace file for replay mode.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn validate_replay_file(config: &CaptureConfig) -> Result<(), ValidationError> {
    if config.is_replay() && config.file.is_none() {
        return Err(ValidationError::new("replay_requires_file"));
    }
    Ok(())
}

fn default_mode() -> String {
    "live".into()
}

fn default_interface() -> String {
    "hci0".into()
}

impl CaptureConfig {
    pub fn capture_mode(&self) -> CaptureMode {
        if self.mode == "replay" {
            CaptureMode::Replay
        } else {
            CaptureMode::Live
        }
    }

    pub fn is_replay(&self) -> bool {
        self.capture_mode() == CaptureMode::Replay
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            interface: default_interface(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_live_mode() {
        let config = CaptureConfig::default();
        config.validate().unwrap();
        assert_eq!(config.capture_mode(), CaptureMode::Live);
        assert!(!config.is_replay());
    }

    #[test]
    fn rejects_unknown_mode() {
        let config = CaptureConfig {
            mode: "promiscuous".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn replay_mode_requires_a_trace_file() {
        let config = CaptureConfig {
            mode: "replay".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CaptureConfig {
            mode: "replay".into(),
            file: Some("/tmp/trace.log".into()),
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn rejects_malformed_interface() {
        let config = CaptureConfig {
            interface: "hci0; rm -rf /".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
