// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility controller.
//!
//! Decides whether the transport overlay and the system cursor are shown on
//! the player page. Two idle countdowns hide them after a period without
//! input; activity reveals them again with a fade. The controller owns its
//! state outright: playback changes reach it through explicit calls
//! (`set_media_present`, `set_playing`), never by sharing the session.
//!
//! Rules:
//! - Countdowns only run while the page is active, media is open, playback
//!   is running and the pointer is not over the overlay.
//! - Pointer motion restarts both countdowns and reveals overlay and cursor.
//!   A key press restarts the overlay countdown and reveals the overlay only.
//! - Hovering the overlay stops both countdowns; leaving it restarts both.
//! - A completed fade-out detaches the overlay from rendering.
//! - Without media the overlay is never rendered.

mod fade;
mod idle;

pub use fade::{FadeCompletion, FadeDirection, FadeProgress, FadeSlot, OPAQUE, TRANSPARENT};
pub use idle::IdleTimer;

use crate::config::{
    DEFAULT_CURSOR_HIDE_MS, DEFAULT_FADE_MS, DEFAULT_IDLE_HIDE_MS, DEFAULT_TICK_MS,
};
use std::time::{Duration, Instant};

/// Timing parameters, resolved from `[overlay]` in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimings {
    pub idle_hide: Duration,
    pub cursor_hide: Duration,
    pub fade: Duration,
    /// Control-thread tick interval.
    pub tick: Duration,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self {
            idle_hide: Duration::from_millis(DEFAULT_IDLE_HIDE_MS),
            cursor_hide: Duration::from_millis(DEFAULT_CURSOR_HIDE_MS),
            fade: Duration::from_millis(DEFAULT_FADE_MS),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

/// Read-only snapshot for the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub cursor_visible: bool,
    pub fade: Option<FadeProgress>,
}

/// Things that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    FadeStarted(FadeDirection),
    FadeCompleted(FadeDirection),
    CursorVisibility(bool),
}

/// Owner of the overlay and cursor visibility.
#[derive(Debug, Clone)]
pub struct OverlayController {
    timings: OverlayTimings,
    visible: bool,
    cursor_visible: bool,
    fade: FadeSlot,
    overlay_idle: IdleTimer,
    cursor_idle: IdleTimer,
    active: bool,
    media_present: bool,
    playing: bool,
    hovered: bool,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(OverlayTimings::default())
    }
}

impl OverlayController {
    pub fn new(timings: OverlayTimings) -> Self {
        Self {
            timings,
            visible: true,
            cursor_visible: true,
            fade: FadeSlot::new(timings.fade),
            overlay_idle: IdleTimer::new(timings.idle_hide),
            cursor_idle: IdleTimer::new(timings.cursor_hide),
            active: false,
            media_present: false,
            playing: false,
            hovered: false,
        }
    }

    pub fn timings(&self) -> OverlayTimings {
        self.timings
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The player page became visible.
    pub fn activate(&mut self, now: Instant) {
        self.active = true;
        self.hovered = false;
        self.force_show(now);
    }

    /// The player page was left. Returns to a shown, non-animating state with
    /// both countdowns stopped, so the next activation starts clean.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.hovered = false;
        self.fade.snap(OPAQUE);
        self.visible = true;
        self.cursor_visible = true;
        self.disarm_timers();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Media appeared (`FileLoaded`) or went away (unload, failure).
    pub fn set_media_present(&mut self, present: bool, now: Instant) {
        if present == self.media_present {
            return;
        }
        self.media_present = present;
        if present {
            self.force_show(now);
        } else {
            self.playing = false;
            self.force_hide();
        }
    }

    /// Playback resumed or paused. While paused the overlay stays up.
    pub fn set_playing(&mut self, playing: bool, now: Instant) {
        if playing == self.playing {
            return;
        }
        self.playing = playing;
        if playing {
            self.restart_timers(now);
        } else {
            self.disarm_timers();
            self.reveal(now);
            self.cursor_visible = true;
        }
    }

    /// Shows everything immediately (no fade) and arms the countdowns.
    pub fn force_show(&mut self, now: Instant) {
        self.cursor_visible = true;
        if self.media_present {
            self.fade.snap(OPAQUE);
            self.visible = true;
        }
        self.restart_timers(now);
    }

    /// Hides the overlay immediately and stops the countdowns. The cursor
    /// is left visible.
    pub fn force_hide(&mut self) {
        self.fade.snap(TRANSPARENT);
        self.visible = false;
        // A detached overlay cannot report the pointer leaving it.
        self.hovered = false;
        self.cursor_visible = true;
        self.disarm_timers();
    }

    // =========================================================================
    // Activity
    // =========================================================================

    pub fn pointer_moved(&mut self, now: Instant) {
        if !self.active {
            return;
        }
        self.cursor_visible = true;
        self.reveal(now);
        self.restart_timers(now);
    }

    pub fn key_pressed(&mut self, now: Instant) {
        if !self.active {
            return;
        }
        self.reveal(now);
        if self.countdowns_enabled() {
            self.overlay_idle.restart(now);
        }
    }

    pub fn pointer_entered_overlay(&mut self) {
        self.hovered = true;
        self.disarm_timers();
    }

    pub fn pointer_left_overlay(&mut self, now: Instant) {
        self.hovered = false;
        self.restart_timers(now);
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advances the fade and fires expired countdowns.
    pub fn tick(&mut self, now: Instant) -> Vec<OverlayEffect> {
        let mut effects = Vec::new();

        if let Some(done) = self.fade.advance(now) {
            if done.direction == FadeDirection::Out {
                self.visible = false;
            }
            effects.push(OverlayEffect::FadeCompleted(done.direction));
        }

        if self.overlay_idle.fire(now) && !self.hovered && self.is_overlay_rendered() {
            if self.fade.direction() != Some(FadeDirection::Out)
                && self.fade.start(FadeDirection::Out, now).is_some()
            {
                log::trace!("Overlay idle, fading out");
                effects.push(OverlayEffect::FadeStarted(FadeDirection::Out));
            }
        }

        if self.cursor_idle.fire(now) && !self.hovered && self.cursor_visible {
            self.cursor_visible = false;
            effects.push(OverlayEffect::CursorVisibility(false));
        }

        effects
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the overlay takes part in layout and input at all.
    pub fn is_overlay_rendered(&self) -> bool {
        self.media_present && self.visible
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        if self.is_overlay_rendered() {
            self.fade.opacity(now)
        } else {
            TRANSPARENT
        }
    }

    /// Returns true while a fade needs animation frames.
    pub fn is_animating(&self) -> bool {
        self.fade.direction().is_some()
    }

    pub fn overlay_deadline(&self) -> Option<Instant> {
        self.overlay_idle.deadline()
    }

    pub fn cursor_deadline(&self) -> Option<Instant> {
        self.cursor_idle.deadline()
    }

    pub fn state(&self, now: Instant) -> OverlayState {
        OverlayState {
            visible: self.is_overlay_rendered(),
            cursor_visible: self.cursor_visible,
            fade: self.fade.in_flight(now),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn countdowns_enabled(&self) -> bool {
        self.active && self.media_present && self.playing && !self.hovered
    }

    fn restart_timers(&mut self, now: Instant) {
        if self.countdowns_enabled() {
            self.overlay_idle.restart(now);
            self.cursor_idle.restart(now);
        } else {
            self.disarm_timers();
        }
    }

    fn disarm_timers(&mut self) {
        self.overlay_idle.disarm();
        self.cursor_idle.disarm();
    }

    /// Fades the overlay in unless it is already up with no hide pending.
    fn reveal(&mut self, now: Instant) {
        if !self.media_present {
            return;
        }
        let hiding = self.fade.direction() == Some(FadeDirection::Out);
        if self.visible && !hiding {
            return;
        }
        if !self.visible {
            self.fade.snap(TRANSPARENT);
            self.visible = true;
        }
        self.fade.start(FadeDirection::In, now);
    }
}
