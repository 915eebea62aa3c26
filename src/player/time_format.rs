// SPDX-License-Identifier: MPL-2.0
//! Time projection helpers for the transport overlay.
//!
//! Converts between engine milliseconds, the `MM:SS` clock labels and the
//! integer progress slider (`0..=SLIDER_MAX`).

use crate::config::SLIDER_MAX;

/// Milliseconds per second.
pub const MILLIS_PER_SECOND: u64 = 1000;

/// Formats milliseconds as a `MM:SS` clock.
///
/// Seconds are floor-divided; minutes keep growing past 99 instead of
/// wrapping into hours.
///
/// # Examples
///
/// ```
/// use klydio::player::time_format::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(61_999), "01:01");
/// assert_eq!(format_clock(6_000_000), "100:00");
/// ```
pub fn format_clock(millis: u64) -> String {
    let seconds = millis / MILLIS_PER_SECOND;
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    format!("{minutes:02}:{seconds:02}")
}

/// Formats the `elapsed / total` label shown next to the slider.
pub fn format_progress(elapsed_millis: u64, duration_millis: u64) -> String {
    format!(
        "{} / {}",
        format_clock(elapsed_millis),
        format_clock(duration_millis)
    )
}

/// Parses a `MM:SS` clock back into milliseconds.
///
/// Returns `None` for anything that is not two colon-separated numbers with
/// seconds below 60.
pub fn parse_clock(text: &str) -> Option<u64> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(MILLIS_PER_SECOND)
}

/// Projects the playback position onto the progress slider.
///
/// Returns 0 while the duration is unknown (`duration_millis == 0`).
pub fn slider_position(elapsed_millis: u64, duration_millis: u64) -> u32 {
    if duration_millis == 0 {
        return 0;
    }
    let elapsed = elapsed_millis.min(duration_millis) as f64;
    let ratio = elapsed / duration_millis as f64;
    (ratio * f64::from(SLIDER_MAX)).round() as u32
}

/// Maps a slider value back to an absolute position in milliseconds.
///
/// Values above `SLIDER_MAX` are treated as `SLIDER_MAX`.
pub fn slider_to_millis(position: u32, duration_millis: u64) -> u64 {
    let position = u128::from(position.min(SLIDER_MAX));
    let target = position * u128::from(duration_millis) / u128::from(SLIDER_MAX);
    // target <= duration_millis, which fits in u64.
    target as u64
}
