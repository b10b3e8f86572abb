//! In-memory device repository.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use blodhund_core::events::{DeviceAddress, ParsedResult};

use crate::{Device, DeviceStore, StoreError};

/// Thread-safe in-memory store keyed by device address.
#[derive(Default)]
pub struct MemoryStore {
    devices: RwLock<HashMap<DeviceAddress, Device>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    pub fn get(&self, address: &DeviceAddress) -> Option<Device> {
        self.devices.read().get(address).cloned()
    }
}

impl DeviceStore for MemoryStore {
    fn upsert_from_result(&self, result: &ParsedResult, now: u64) -> Result<Device, StoreError> {
        let address = result.address().ok_or(StoreError::MissingAddress)?;
        let mut devices = self.devices.write();

        let device = devices
            .entry(address.clone())
            .or_insert_with(|| Device::new(address.clone(), now));

        if let Some(name) = result.attribute("name") {
            device.name = Some(name.to_string());
        }
        if let Some(company) = result.attribute("company") {
            device.company = Some(company.to_string());
        }
        if let Some(rssi) = result.attribute("rssi").and_then(|v| v.parse().ok()) {
            device.rssi = Some(rssi);
        }
        device.le_mode |= result.le_mode();
        device.classic_mode |= result.classic_mode();
        device.last_seen = now;

        // A sighting always brings the device back online.
        if !device.is_online() {
            debug!(address = %device.address, "Device back online");
        }
        device.status = crate::DeviceStatus::Online;

        Ok(device.clone())
    }

    fn select(&self, predicate: &dyn Fn(&Device) -> bool) -> Vec<Device> {
        self.devices
            .read()
            .values()
            .filter(|device| predicate(device))
            .cloned()
            .collect()
    }

    fn persist(&self, device: &Device) -> Result<(), StoreError> {
        self.devices
            .write()
            .insert(device.address.clone(), device.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviceStatus;

    fn result_for(address: &str) -> ParsedResult {
        let mut result = ParsedResult::new();
        result.set_address(address.parse().unwrap());
        result
    }

    #[test]
    fn upsert_creates_online_device() {
        let store = MemoryStore::new();
        let device = store
            .upsert_from_result(&result_for("00:11:22:33:44:55"), 1_000)
            .unwrap();
        assert_eq!(device.last_seen, 1_000);
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_merges_flags_and_refreshes_last_seen() {
        let store = MemoryStore::new();
        let mut le = result_for("00:11:22:33:44:55");
        le.set_le_mode(true);
        store.upsert_from_result(&le, 1_000).unwrap();

        let mut classic = result_for("00:11:22:33:44:55");
        classic.set_classic_mode(true);
        classic.set_attribute("name", "keyboard");
        let device = store.upsert_from_result(&classic, 2_000).unwrap();

        assert!(device.le_mode);
        assert!(device.classic_mode);
        assert_eq!(device.last_seen, 2_000);
        assert_eq!(device.name.as_deref(), Some("keyboard"));
    }

    #[test]
    fn upsert_revives_offline_device() {
        let store = MemoryStore::new();
        let mut device = store
            .upsert_from_result(&result_for("00:11:22:33:44:55"), 1_000)
            .unwrap();

        device.status = DeviceStatus::Offline;
        store.persist(&device).unwrap();

        let revived = store
            .upsert_from_result(&result_for("00:11:22:33:44:55"), 5_000)
            .unwrap();
        assert_eq!(revived.status, DeviceStatus::Online);
    }

    #[test]
    fn upsert_rejects_result_without_address() {
        let store = MemoryStore::new();
        let err = store.upsert_from_result(&ParsedResult::new(), 1_000);
        assert!(matches!(err, Err(StoreError::MissingAddress)));
        assert!(store.is_empty());
    }

    #[test]
    fn select_filters_on_predicate() {
        let store = MemoryStore::new();
        store
            .upsert_from_result(&result_for("00:11:22:33:44:55"), 100)
            .unwrap();
        store
            .upsert_from_result(&result_for("AA:BB:CC:DD:EE:FF"), 900)
            .unwrap();

        let stale = store.select(&|d| d.last_seen < 500);
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].address.as_str(), "00:11:22:33:44:55");
    }
}
