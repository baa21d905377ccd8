//! Controllable clock for deterministic tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use warden_core::ClockSource;

/// Clock that only moves when told to.
///
/// Clones share the same instant, so a clone handed to a policy can be
/// advanced from the test body.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock frozen at `secs`
    pub fn at(secs: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(secs)),
        }
    }

    /// Jump to `secs`
    pub fn set(&self, secs: u64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    /// Move forward by `secs`
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl ClockSource for ManualClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
