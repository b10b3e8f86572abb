//! # Blodhund Configuration System
//!
//! Hierarchical configuration management for the Blodhund discovery
//! daemon.
//!
//! ## Features
//! - **Unified Configuration**: single source of truth across all components
//! - **Validation**: runtime validation of critical parameters
//! - **Environment Awareness**: `BLODHUND_*` environment overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod capture;
mod error;
mod scheduler;
mod telemetry;
mod validation;

pub use capture::{CaptureConfig, CaptureMode};
pub use error::ConfigError;
pub use scheduler::SchedulerConfig;
pub use telemetry::TelemetryConfig;

/// Top-level configuration container for all Blodhund components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct BlodhundConfig {
    /// Trace capture parameters (live adapter or recorded file).
    #[validate(nested)]
    pub capture: CaptureConfig,

    /// Active-probe scheduling thresholds.
    #[validate(nested)]
    pub scheduler: SchedulerConfig,

    /// Telemetry and observability configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl BlodhundConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/blodhund.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `BLODHUND_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(BlodhundConfig::default()));

        if Path::new("config/blodhund.yaml").exists() {
            figment = figment.merge(Yaml::file("config/blodhund.yaml"));
        }

        let env = std::env::var("BLODHUND_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("BLODHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(BlodhundConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("BLODHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
