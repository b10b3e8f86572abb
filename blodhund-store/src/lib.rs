//! # blodhund-store
//!
//! Device repository keyed by address. The pipeline core only ever
//! transitions a device `Online -> Offline`; the reverse transition is the
//! upsert path's decision and happens here when a fresh result arrives for
//! a previously offline device.

mod device;
mod memory;

use thiserror::Error;

pub use device::{Device, DeviceStatus};
pub use memory::MemoryStore;

use blodhund_core::events::ParsedResult;

/// Store error conditions.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Result has no address and cannot be stored")]
    MissingAddress,
}

/// Persistent device repository contract.
///
/// Object-safe so the engine can run against the in-memory store in tests
/// and a durable backend in production.
pub trait DeviceStore: Send + Sync {
    /// Create-or-merge keyed by address: merges attributes, ORs the mode
    /// flags, refreshes `last_seen`, and sets the device online. Returns
    /// the resulting device.
    fn upsert_from_result(&self, result: &ParsedResult, now: u64) -> Result<Device, StoreError>;

    /// All devices matching the predicate.
    fn select(&self, predicate: &dyn Fn(&Device) -> bool) -> Vec<Device>;

    /// Persist a modified device record.
    fn persist(&self, device: &Device) -> Result<(), StoreError>;
}
