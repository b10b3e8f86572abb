//! Epoch clocks for scheduling decisions.
//!
//! All probe throttling and sweep thresholds are wall-clock epoch-second
//! comparisons. The `Clock` trait keeps the deciders testable: production
//! code uses [`SystemClock`], tests drive a [`VirtualClock`] forward by
//! hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Epoch-second time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Clone)]
pub struct VirtualClock {
    offset: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new(start: u64) -> Self {
        Self {
            offset: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.offset.fetch_add(secs, Ordering::Release);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> u64 {
        self.offset.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_advances() {
        let clock = VirtualClock::new(1_000);
        assert_eq!(clock.now(), 1_000);
        clock.advance(900);
        assert_eq!(clock.now(), 1_900);
    }

    #[test]
    fn virtual_clock_shares_state_across_clones() {
        let clock = VirtualClock::new(0);
        let other = clock.clone();
        clock.advance(60);
        assert_eq!(other.now(), 60);
    }

    #[test]
    fn system_clock_is_nonzero() {
        assert!(SystemClock.now() > 0);
    }
}
