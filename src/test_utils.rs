// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by unit tests.
//!
//! Re-exports the `approx` assertion macros for opacity comparisons and
//! provides a virtual clock for driving the time-based controllers.

pub use approx::assert_abs_diff_eq;

use std::time::{Duration, Instant};

/// Deterministic clock: tests advance it explicitly instead of sleeping.
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
    now: Instant,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward and returns the new time.
    pub fn advance_ms(&mut self, millis: u64) -> Instant {
        self.now += Duration::from_millis(millis);
        self.now
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}
