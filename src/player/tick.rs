// SPDX-License-Identifier: MPL-2.0
//! Coalescing of periodic control ticks.

use std::time::{Duration, Instant};

/// Admits at most one tick per half interval.
///
/// Timer deliveries that pile up while the UI is busy arrive back to back;
/// only the first of such a burst is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickGate {
    interval: Duration,
    last: Option<Instant>,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if the tick at `now` should be processed.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.interval / 2 {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    /// Forgets the last processed tick.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
