// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Playback volume and keyboard step
//! - **Seek**: Keyboard seek step and slider resolution
//! - **Overlay**: Idle auto-hide, cursor auto-hide, fade and tick timings

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (percent).
pub const DEFAULT_VOLUME_PERCENT: u8 = 100;

/// Minimum volume level (percent).
pub const MIN_VOLUME_PERCENT: u8 = 0;

/// Maximum volume level (percent).
pub const MAX_VOLUME_PERCENT: u8 = 100;

/// Volume adjustment per Up/Down key press (percent).
pub const DEFAULT_VOLUME_STEP_PERCENT: u8 = 5;

/// Largest accepted volume step (percent).
pub const MAX_VOLUME_STEP_PERCENT: u8 = 25;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Relative seek per Left/Right key press (seconds).
pub const DEFAULT_SEEK_STEP_SECS: u32 = 5;

/// Minimum keyboard seek step (seconds).
pub const MIN_SEEK_STEP_SECS: u32 = 1;

/// Maximum keyboard seek step (seconds).
pub const MAX_SEEK_STEP_SECS: u32 = 60;

/// Resolution of the progress slider. Slider values live in `0..=SLIDER_MAX`.
pub const SLIDER_MAX: u32 = 1000;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Overlay auto-hide countdown (milliseconds).
pub const DEFAULT_IDLE_HIDE_MS: u64 = 3000;

/// Cursor auto-hide countdown (milliseconds). Shorter than the overlay one.
pub const DEFAULT_CURSOR_HIDE_MS: u64 = 2000;

/// Minimum idle countdown accepted from the config file (milliseconds).
pub const MIN_IDLE_HIDE_MS: u64 = 500;

/// Maximum idle countdown accepted from the config file (milliseconds).
pub const MAX_IDLE_HIDE_MS: u64 = 30_000;

/// Fade animation length (milliseconds).
pub const DEFAULT_FADE_MS: u64 = 300;

/// Maximum fade animation length (milliseconds).
pub const MAX_FADE_MS: u64 = 2000;

/// Control-thread tick interval (milliseconds).
pub const DEFAULT_TICK_MS: u64 = 100;

/// Minimum tick interval (milliseconds).
pub const MIN_TICK_MS: u64 = 16;

/// Maximum tick interval (milliseconds).
pub const MAX_TICK_MS: u64 = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MAX_VOLUME_PERCENT > MIN_VOLUME_PERCENT);
    assert!(DEFAULT_VOLUME_PERCENT <= MAX_VOLUME_PERCENT);
    assert!(DEFAULT_VOLUME_STEP_PERCENT > 0);
    assert!(DEFAULT_VOLUME_STEP_PERCENT <= MAX_VOLUME_STEP_PERCENT);

    assert!(MIN_SEEK_STEP_SECS > 0);
    assert!(DEFAULT_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS <= MAX_SEEK_STEP_SECS);
    assert!(SLIDER_MAX > 0);

    assert!(DEFAULT_CURSOR_HIDE_MS <= DEFAULT_IDLE_HIDE_MS);
    assert!(DEFAULT_IDLE_HIDE_MS >= MIN_IDLE_HIDE_MS);
    assert!(DEFAULT_IDLE_HIDE_MS <= MAX_IDLE_HIDE_MS);
    assert!(DEFAULT_CURSOR_HIDE_MS >= MIN_IDLE_HIDE_MS);
    assert!(DEFAULT_FADE_MS <= MAX_FADE_MS);
    assert!(DEFAULT_TICK_MS >= MIN_TICK_MS);
    assert!(DEFAULT_TICK_MS <= MAX_TICK_MS);
};
