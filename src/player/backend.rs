// SPDX-License-Identifier: MPL-2.0
//! Capability interface implemented once per decode/render backend.
//!
//! [`PlaybackEngine`](super::PlaybackEngine) drives any backend through this
//! trait. Every transport call is fire-and-forget: the backend reports what
//! actually happened later through the [`Notifier`] it received on `open`.

use super::frame_sink::FrameSink;
use super::notifier::Notifier;
use super::volume::VolumePercent;
use crate::error::EngineError;
use std::path::Path;

/// Notifications a backend posts about the session it is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The media is open and the first frame is on its way.
    FileLoaded,

    /// `true` when playback paused, `false` when it resumed.
    PauseChanged(bool),

    /// Current position in milliseconds. Non-decreasing within a session,
    /// except right after a backward seek.
    PositionChanged(u64),

    /// Total length in milliseconds.
    DurationChanged(u64),

    /// The engine stopped because of an error after loading.
    PlaybackFailed(String),
}

/// Options handed to the backend with every load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Ask the backend not to render subtitle streams.
    pub suppress_subtitles: bool,

    /// Where decoded frames should be presented. `None` runs headless.
    pub surface: Option<FrameSink>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            suppress_subtitles: true,
            surface: None,
        }
    }
}

/// Position and duration read directly from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSample {
    pub position_millis: u64,
    pub duration_millis: u64,
}

/// A decode/render backend.
pub trait EngineBackend {
    /// Starts loading `path`. Must return quickly; completion is reported
    /// with [`EngineEvent::FileLoaded`] through `notifier`.
    ///
    /// Any session that was running must be stopped first.
    fn open(
        &mut self,
        path: &Path,
        options: &LoadOptions,
        notifier: Notifier,
    ) -> Result<(), EngineError>;

    /// Flips between playing and paused.
    fn toggle_pause(&mut self);

    /// Jumps to an absolute position. The target is already clamped to the
    /// known duration.
    fn seek_to(&mut self, target_millis: u64);

    fn set_volume(&mut self, volume: VolumePercent);

    /// Stops the current session, if any. Must not block on the backend's
    /// worker.
    fn stop(&mut self);

    /// Polls position and duration for backends that do not push them.
    fn sample(&self) -> Option<EngineSample> {
        None
    }
}

impl<B: EngineBackend + ?Sized> EngineBackend for Box<B> {
    fn open(
        &mut self,
        path: &Path,
        options: &LoadOptions,
        notifier: Notifier,
    ) -> Result<(), EngineError> {
        (**self).open(path, options, notifier)
    }

    fn toggle_pause(&mut self) {
        (**self).toggle_pause();
    }

    fn seek_to(&mut self, target_millis: u64) {
        (**self).seek_to(target_millis);
    }

    fn set_volume(&mut self, volume: VolumePercent) {
        (**self).set_volume(volume);
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn sample(&self) -> Option<EngineSample> {
        (**self).sample()
    }
}
