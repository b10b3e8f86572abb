//! Bluetooth device address newtype.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address parsing error conditions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Address must be 17 characters (XX:XX:XX:XX:XX:XX), got {0} characters")]
    InvalidLength(usize),
    #[error("Invalid address character at position {0}")]
    InvalidCharacter(usize),
}

/// A Bluetooth device address (`XX:XX:XX:XX:XX:XX`), the identity key for
/// every device the pipeline tracks.
///
/// Stored uppercase so addresses compare equal regardless of the casing
/// the trace emitted them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DeviceAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 17 {
            return Err(AddressParseError::InvalidLength(s.len()));
        }
        for (i, c) in s.chars().enumerate() {
            let valid = if i % 3 == 2 {
                c == ':'
            } else {
                c.is_ascii_hexdigit()
            };
            if !valid {
                return Err(AddressParseError::InvalidCharacter(i));
            }
        }
        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
