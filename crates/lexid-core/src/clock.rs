//! Clock sources for ULID timestamps

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Largest timestamp representable in the 48-bit field
pub const TIMESTAMP_MAX_MS: u64 = (1 << 48) - 1;

/// Source of the millisecond timestamp stamped into new identifiers
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        unix_millis(SystemTime::now())
    }
}

/// Clock pinned to one instant; settable for deterministic runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl FixedClock {
    #[inline]
    pub fn new(ms: u64) -> Self {
        FixedClock(ms)
    }

    #[inline]
    pub fn set(&mut self, ms: u64) {
        self.0 = ms;
    }

    #[inline]
    pub fn advance(&mut self, by: Duration) {
        self.0 = self.0.saturating_add(by.as_millis() as u64);
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Convert a point in time to Unix milliseconds
///
/// Times before the epoch clamp to 0. Callers storing the result in the
/// 48-bit field keep only the low 48 bits.
pub fn unix_millis(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => u64::try_from(since.as_millis()).unwrap_or(u64::MAX),
        Err(_) => 0,
    }
}

/// Convert Unix milliseconds back to a point in time
#[inline]
pub fn from_unix_millis(ms: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(ms)
}
