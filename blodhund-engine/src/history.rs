//! Per-address probe throttling state.
//!
//! Owned exclusively by the result aggregator's loop; never shared across
//! workers, so no synchronization is needed. A missing entry reads as
//! zero, which makes a device's first eligible check fire immediately.

use std::collections::HashMap;

use blodhund_core::events::{DeviceAddress, ProbeKind};

/// Last-trigger epoch seconds per device address and probe kind.
#[derive(Debug, Default)]
pub struct QueryHistory {
    entries: HashMap<DeviceAddress, HashMap<ProbeKind, u64>>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch seconds of the last trigger, zero when never triggered.
    pub fn last_triggered(&self, address: &DeviceAddress, kind: ProbeKind) -> u64 {
        self.entries
            .get(address)
            .and_then(|kinds| kinds.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the throttle window has elapsed for this address and kind.
    pub fn is_due(&self, address: &DeviceAddress, kind: ProbeKind, now: u64, interval: u64) -> bool {
        now.saturating_sub(self.last_triggered(address, kind)) >= interval
    }

    /// Record a trigger. Entries are monotonically non-decreasing.
    pub fn stamp(&mut self, address: &DeviceAddress, kind: ProbeKind, now: u64) {
        let entry = self
            .entries
            .entry(address.clone())
            .or_default()
            .entry(kind)
            .or_insert(0);
        *entry = (*entry).max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeviceAddress {
        "00:11:22:33:44:55".parse().unwrap()
    }

    #[test]
    fn missing_entry_is_always_due() {
        let history = QueryHistory::new();
        assert_eq!(history.last_triggered(&address(), ProbeKind::Le), 0);
        assert!(history.is_due(&address(), ProbeKind::Le, 1_700_000_000, 900));
    }

    #[test]
    fn throttles_within_the_window() {
        let mut history = QueryHistory::new();
        let t0 = 1_700_000_000;
        history.stamp(&address(), ProbeKind::Le, t0);

        assert!(!history.is_due(&address(), ProbeKind::Le, t0 + 100, 900));
        assert!(!history.is_due(&address(), ProbeKind::Le, t0 + 899, 900));
        assert!(history.is_due(&address(), ProbeKind::Le, t0 + 900, 900));
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let mut history = QueryHistory::new();
        let t0 = 1_700_000_000;
        history.stamp(&address(), ProbeKind::Le, t0);

        assert!(history.is_due(&address(), ProbeKind::Info, t0, 900));
        assert!(history.is_due(&address(), ProbeKind::L2Ping, t0, 900));
    }

    #[test]
    fn stamps_never_move_backwards() {
        let mut history = QueryHistory::new();
        history.stamp(&address(), ProbeKind::L2Ping, 2_000);
        history.stamp(&address(), ProbeKind::L2Ping, 1_000);
        assert_eq!(history.last_triggered(&address(), ProbeKind::L2Ping), 2_000);
    }
}
