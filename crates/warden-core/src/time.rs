//! Clock abstraction.
//!
//! Ticket expiry is the only time-dependent behaviour in Warden. Reading the
//! wall clock goes through [`ClockSource`] so tests and simulations can pin
//! `now` to a known value.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current time as Unix seconds.
pub trait ClockSource: Send + Sync {
    /// Current Unix timestamp in seconds.
    fn now_secs(&self) -> u64;
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    #[allow(clippy::disallowed_methods)] // the one sanctioned wall-clock read
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Blanket implementation for Arc<T> where T: ClockSource
impl<T: ClockSource + ?Sized> ClockSource for Arc<T> {
    fn now_secs(&self) -> u64 {
        (**self).now_secs()
    }
}

impl<T: ClockSource + ?Sized> ClockSource for &T {
    fn now_secs(&self) -> u64 {
        (**self).now_secs()
    }
}
