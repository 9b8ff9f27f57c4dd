//! Injectable clock.
//!
//! Every published result is stamped from a [`Clock`] rather than an
//! ambient `Utc::now()`, so recomputation against an unchanged snapshot
//! with the same clock reading is byte-identical and the coalescing
//! behavior is testable deterministically.

use chrono::{DateTime, Utc};

/// Time source for result timestamps.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time. The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed-time clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
