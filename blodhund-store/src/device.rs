//! Device model.

use serde::{Deserialize, Serialize};

use blodhund_core::events::DeviceAddress;

/// Reachability status as judged by the offline sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

/// A tracked Bluetooth device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub address: DeviceAddress,
    pub name: Option<String>,
    pub company: Option<String>,
    pub rssi: Option<i32>,
    pub le_mode: bool,
    pub classic_mode: bool,
    /// Epoch seconds of the last trace sighting.
    pub last_seen: u64,
    pub status: DeviceStatus,
}

impl Device {
    pub fn new(address: DeviceAddress, now: u64) -> Self {
        Self {
            address,
            name: None,
            company: None,
            rssi: None,
            le_mode: false,
            classic_mode: false,
            last_seen: now,
            status: DeviceStatus::Online,
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }
}
