// SPDX-License-Identifier: MPL-2.0
//! Single-slot opacity animation.
//!
//! At most one fade exists at a time. Starting a fade replaces the one in
//! flight, beginning from whatever opacity it had reached, so there is never
//! a backlog and a superseded fade can never complete.

use std::time::{Duration, Instant};

pub const OPAQUE: f32 = 1.0;
pub const TRANSPARENT: f32 = 0.0;

/// Which way a fade goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    pub fn target(self) -> f32 {
        match self {
            Self::In => OPAQUE,
            Self::Out => TRANSPARENT,
        }
    }
}

/// Snapshot of the fade in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeProgress {
    pub direction: FadeDirection,
    /// `0.0..=1.0`
    pub progress: f32,
}

/// Reported once when a fade reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeCompletion {
    pub id: u64,
    pub direction: FadeDirection,
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    id: u64,
    direction: FadeDirection,
    from: f32,
    started_at: Instant,
    duration: Duration,
}

impl Fade {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn opacity(&self, now: Instant) -> f32 {
        let target = self.direction.target();
        self.from + (target - self.from) * self.progress(now)
    }
}

/// Owner of the current fade.
#[derive(Debug, Clone)]
pub struct FadeSlot {
    current: Option<Fade>,
    resting: f32,
    full_duration: Duration,
    next_id: u64,
}

impl FadeSlot {
    /// `full_duration` is the length of a complete 0 → 1 transition.
    pub fn new(full_duration: Duration) -> Self {
        Self {
            current: None,
            resting: OPAQUE,
            full_duration,
            next_id: 0,
        }
    }

    /// Starts a fade towards `direction`'s target, superseding any fade in
    /// flight. A partial fade runs proportionally shorter.
    ///
    /// Returns the id of the new fade, or `None` when the opacity is already
    /// at the target and nothing is in flight.
    pub fn start(&mut self, direction: FadeDirection, now: Instant) -> Option<u64> {
        let from = self.opacity(now);
        let target = direction.target();
        if self.current.is_none() && from == target {
            return None;
        }

        self.next_id += 1;
        let distance = (target - from).abs();
        let duration = if distance >= OPAQUE {
            self.full_duration
        } else {
            self.full_duration.mul_f32(distance)
        };
        self.current = Some(Fade {
            id: self.next_id,
            direction,
            from,
            started_at: now,
            duration,
        });
        Some(self.next_id)
    }

    /// Drops the fade in flight and jumps to `opacity`. No completion will be
    /// reported for the dropped fade.
    pub fn snap(&mut self, opacity: f32) {
        self.current = None;
        self.resting = opacity.clamp(TRANSPARENT, OPAQUE);
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.current
            .as_ref()
            .map_or(self.resting, |fade| fade.opacity(now))
    }

    pub fn in_flight(&self, now: Instant) -> Option<FadeProgress> {
        self.current.as_ref().map(|fade| FadeProgress {
            direction: fade.direction,
            progress: fade.progress(now),
        })
    }

    pub fn direction(&self) -> Option<FadeDirection> {
        self.current.as_ref().map(|fade| fade.direction)
    }

    /// Finishes the fade if it has reached its end.
    ///
    /// The completion is taken out of the slot, so each fade reports at most
    /// once.
    pub fn advance(&mut self, now: Instant) -> Option<FadeCompletion> {
        let fade = self.current?;
        if fade.progress(now) < 1.0 {
            return None;
        }
        self.current = None;
        self.resting = fade.direction.target();
        Some(FadeCompletion {
            id: fade.id,
            direction: fade.direction,
        })
    }
}
