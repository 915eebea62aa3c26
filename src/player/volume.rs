// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for playback.
//!
//! Volume is expressed in whole percent. Every way of building or changing a
//! value clamps into `0..=100`, so an out-of-range request is never rejected.

use crate::config::{DEFAULT_VOLUME_PERCENT, MAX_VOLUME_PERCENT, MIN_VOLUME_PERCENT};

/// Volume level in percent, guaranteed to be within `0..=100`.
///
/// # Example
///
/// ```
/// use klydio::player::VolumePercent;
///
/// assert_eq!(VolumePercent::new(55).value(), 55);
/// assert_eq!(VolumePercent::new(180).value(), 100);
/// assert_eq!(VolumePercent::new(-3).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumePercent(u8);

impl VolumePercent {
    /// Creates a volume level, clamping to the valid range.
    #[must_use]
    pub fn new(percent: i32) -> Self {
        let clamped = percent.clamp(
            i32::from(MIN_VOLUME_PERCENT),
            i32::from(MAX_VOLUME_PERCENT),
        );
        // Clamped into 0..=100 above.
        Self(clamped as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns a new level moved by `delta` percent, clamped.
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        Self::new(i32::from(self.0).saturating_add(delta))
    }

    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 == MIN_VOLUME_PERCENT
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_VOLUME_PERCENT
    }

    /// Linear amplitude factor for this level.
    ///
    /// Quadratic, so the slider feels even to the ear: 50% plays at a
    /// quarter amplitude (-12 dB).
    #[must_use]
    pub fn gain(self) -> f32 {
        let linear = f32::from(self.0) / f32::from(MAX_VOLUME_PERCENT);
        linear * linear
    }
}

impl Default for VolumePercent {
    fn default() -> Self {
        Self(DEFAULT_VOLUME_PERCENT)
    }
}
