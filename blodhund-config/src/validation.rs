//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref INTERFACE_RE: Regex = Regex::new("^[a-zA-Z0-9_]+$").unwrap();
    static ref TOOL_RE: Regex = Regex::new(r"^[a-zA-Z0-9_./-]+$").unwrap();
}

/// Validate that an adapter name follows Linux naming conventions.
pub fn validate_interface(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty() && name.len() <= 15 && INTERFACE_RE.is_match(name);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_interface"))
    }
}

/// Validate capture mode.
pub fn validate_mode(mode: &str) -> Result<(), ValidationError> {
    if matches!(mode, "live" | "replay") {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_capture_mode"))
    }
}

/// Validate an external tool name or path.
pub fn validate_tool_name(tool: &str) -> Result<(), ValidationError> {
    if !tool.is_empty() && TOOL_RE.is_match(tool) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_tool_name"))
    }
}
