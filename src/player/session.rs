// SPDX-License-Identifier: MPL-2.0
//! Playback state machine.
//!
//! Tracks the logical state of the single active session from engine
//! notifications:
//! - Idle: No media, the placeholder is shown
//! - Loading: A load was requested, `FileLoaded` has not arrived yet
//! - Playing / Paused: Media is open; toggled by `PauseChanged`
//!
//! Any state returns to Idle on `PlaybackFailed` or an explicit unload.

use super::backend::{EngineEvent, EngineSample};
use super::time_format;
use super::volume::VolumePercent;
use crate::error::EngineError;
use std::path::{Path, PathBuf};

/// Logical player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No media loaded.
    #[default]
    Idle,

    /// Load requested, waiting for the engine to open the file.
    Loading,

    /// Media is playing.
    Playing,

    /// Media is paused.
    Paused,
}

impl PlaybackState {
    /// Returns true once the engine has opened the media.
    pub fn has_media(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }
}

/// Something observable that changed while applying a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    StateChanged {
        from: PlaybackState,
        to: PlaybackState,
    },
    ElapsedChanged(u64),
    DurationChanged(u64),
    /// The session ended in an error; the UI should tell the user.
    Failed(EngineError),
}

/// The active session: logical state plus the values the overlay displays.
///
/// Once `duration_millis > 0`, `elapsed_millis <= duration_millis` holds.
/// A duration of 0 means "not known yet".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
    elapsed_millis: u64,
    duration_millis: u64,
    volume: VolumePercent,
    media_path: Option<PathBuf>,
    /// Pause report that overtook `FileLoaded`.
    pending_pause: Option<bool>,
}

impl PlaybackSession {
    pub fn new(volume: VolumePercent) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    pub fn volume(&self) -> VolumePercent {
        self.volume
    }

    pub fn media_path(&self) -> Option<&Path> {
        self.media_path.as_deref()
    }

    pub fn has_media(&self) -> bool {
        self.state.has_media()
    }

    /// `MM:SS / MM:SS` label for the overlay.
    pub fn progress_label(&self) -> String {
        time_format::format_progress(self.elapsed_millis, self.duration_millis)
    }

    /// Slider value in `0..=SLIDER_MAX`; 0 while the duration is unknown.
    pub fn slider_value(&self) -> u32 {
        time_format::slider_position(self.elapsed_millis, self.duration_millis)
    }

    fn transition(&mut self, to: PlaybackState) -> Option<SessionChange> {
        let from = self.state;
        if from == to {
            return None;
        }
        log::debug!("Playback state {:?} -> {:?}", from, to);
        self.state = to;
        Some(SessionChange::StateChanged { from, to })
    }

    /// Enters `Loading` for a new media file and forgets the old progress.
    pub(crate) fn begin_load(&mut self, path: &Path) -> Option<SessionChange> {
        self.elapsed_millis = 0;
        self.duration_millis = 0;
        self.pending_pause = None;
        self.media_path = Some(path.to_path_buf());
        self.transition(PlaybackState::Loading)
    }

    /// Returns to `Idle`, dropping the media and its progress.
    pub(crate) fn unload(&mut self) -> Option<SessionChange> {
        self.elapsed_millis = 0;
        self.duration_millis = 0;
        self.pending_pause = None;
        self.media_path = None;
        self.transition(PlaybackState::Idle)
    }

    pub(crate) fn set_volume(&mut self, volume: VolumePercent) {
        self.volume = volume;
    }

    fn set_elapsed(&mut self, millis: u64) -> Option<SessionChange> {
        let millis = if self.duration_millis > 0 {
            millis.min(self.duration_millis)
        } else {
            millis
        };
        if millis == self.elapsed_millis {
            return None;
        }
        self.elapsed_millis = millis;
        Some(SessionChange::ElapsedChanged(millis))
    }

    fn set_duration(&mut self, millis: u64) -> Vec<SessionChange> {
        let mut changes = Vec::new();
        if millis == self.duration_millis {
            return changes;
        }
        self.duration_millis = millis;
        changes.push(SessionChange::DurationChanged(millis));
        if millis > 0 && self.elapsed_millis > millis {
            self.elapsed_millis = millis;
            changes.push(SessionChange::ElapsedChanged(millis));
        }
        changes
    }

    /// Applies one engine notification.
    pub fn apply(&mut self, event: EngineEvent) -> Vec<SessionChange> {
        match event {
            EngineEvent::FileLoaded => {
                if self.state != PlaybackState::Loading {
                    return Vec::new();
                }
                let target = match self.pending_pause.take() {
                    Some(true) => PlaybackState::Paused,
                    _ => PlaybackState::Playing,
                };
                self.transition(target).into_iter().collect()
            }
            EngineEvent::PauseChanged(paused) => match (self.state, paused) {
                (PlaybackState::Playing, true) => {
                    self.transition(PlaybackState::Paused).into_iter().collect()
                }
                (PlaybackState::Paused, false) => {
                    self.transition(PlaybackState::Playing).into_iter().collect()
                }
                (PlaybackState::Loading, _) => {
                    self.pending_pause = Some(paused);
                    Vec::new()
                }
                _ => Vec::new(),
            },
            EngineEvent::PositionChanged(millis) => {
                if !self.has_media() {
                    return Vec::new();
                }
                self.set_elapsed(millis).into_iter().collect()
            }
            EngineEvent::DurationChanged(millis) => {
                if !self.has_media() {
                    return Vec::new();
                }
                self.set_duration(millis)
            }
            EngineEvent::PlaybackFailed(reason) => {
                log::warn!("Playback failed: {reason}");
                let mut changes: Vec<SessionChange> = self.unload().into_iter().collect();
                changes.push(SessionChange::Failed(EngineError::PlaybackFailed(reason)));
                changes
            }
        }
    }

    /// Applies a polled sample under the same guards as pushed notifications.
    pub fn apply_sample(&mut self, sample: EngineSample) -> Vec<SessionChange> {
        let mut changes = self.apply(EngineEvent::DurationChanged(sample.duration_millis));
        changes.extend(self.apply(EngineEvent::PositionChanged(sample.position_millis)));
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> PlaybackSession {
        let mut session = PlaybackSession::default();
        session.begin_load(Path::new("a.mp4"));
        session.apply(EngineEvent::FileLoaded);
        session
    }

    #[test]
    fn new_session_starts_idle() {
        let session = PlaybackSession::new(VolumePercent::new(40));
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.volume().value(), 40);
        assert!(session.media_path().is_none());
        assert_eq!(session.progress_label(), "00:00 / 00:00");
    }

    #[test]
    fn begin_load_clears_progress_from_previous_media() {
        let mut session = loaded_session();
        session.apply(EngineEvent::DurationChanged(60_000));
        session.apply(EngineEvent::PositionChanged(30_000));

        let change = session.begin_load(Path::new("b.mp4"));
        assert_eq!(
            change,
            Some(SessionChange::StateChanged {
                from: PlaybackState::Playing,
                to: PlaybackState::Loading,
            })
        );
        assert_eq!(session.elapsed_millis(), 0);
        assert_eq!(session.duration_millis(), 0);
        assert_eq!(session.media_path(), Some(Path::new("b.mp4")));
    }

    #[test]
    fn file_loaded_moves_loading_to_playing() {
        let session = loaded_session();
        assert_eq!(session.state(), PlaybackState::Playing);
    }

    #[test]
    fn file_loaded_is_ignored_outside_loading() {
        let mut session = PlaybackSession::default();
        assert!(session.apply(EngineEvent::FileLoaded).is_empty());
        assert_eq!(session.state(), PlaybackState::Idle);
    }

    #[test]
    fn pause_changed_toggles_between_playing_and_paused() {
        let mut session = loaded_session();
        session.apply(EngineEvent::PauseChanged(true));
        assert_eq!(session.state(), PlaybackState::Paused);
        session.apply(EngineEvent::PauseChanged(true));
        assert_eq!(session.state(), PlaybackState::Paused);
        session.apply(EngineEvent::PauseChanged(false));
        assert_eq!(session.state(), PlaybackState::Playing);
    }

    #[test]
    fn pause_report_overtaking_file_loaded_is_honored() {
        let mut session = PlaybackSession::default();
        session.begin_load(Path::new("a.mp4"));
        session.apply(EngineEvent::PauseChanged(true));
        assert_eq!(session.state(), PlaybackState::Loading);
        session.apply(EngineEvent::FileLoaded);
        assert_eq!(session.state(), PlaybackState::Paused);
    }

    #[test]
    fn progress_ignored_while_idle() {
        let mut session = PlaybackSession::default();
        assert!(session.apply(EngineEvent::PositionChanged(5_000)).is_empty());
        assert!(session.apply(EngineEvent::DurationChanged(9_000)).is_empty());
        assert_eq!(session.elapsed_millis(), 0);
        assert_eq!(session.duration_millis(), 0);
    }

    #[test]
    fn progress_ignored_while_loading() {
        let mut session = PlaybackSession::default();
        session.begin_load(Path::new("a.mp4"));
        session.apply(EngineEvent::PositionChanged(5_000));
        session.apply(EngineEvent::DurationChanged(9_000));
        assert_eq!(session.elapsed_millis(), 0);
        assert_eq!(session.duration_millis(), 0);
    }

    #[test]
    fn progress_updates_while_paused() {
        let mut session = loaded_session();
        session.apply(EngineEvent::PauseChanged(true));
        session.apply(EngineEvent::DurationChanged(9_000));
        session.apply(EngineEvent::PositionChanged(4_000));
        assert_eq!(session.elapsed_millis(), 4_000);
        assert_eq!(session.state(), PlaybackState::Paused);
    }

    #[test]
    fn elapsed_is_clamped_to_known_duration() {
        let mut session = loaded_session();
        session.apply(EngineEvent::DurationChanged(10_000));
        session.apply(EngineEvent::PositionChanged(12_000));
        assert_eq!(session.elapsed_millis(), 10_000);
    }

    #[test]
    fn shrinking_duration_pulls_elapsed_along() {
        let mut session = loaded_session();
        session.apply(EngineEvent::PositionChanged(12_000));
        assert_eq!(session.elapsed_millis(), 12_000);

        let changes = session.apply(EngineEvent::DurationChanged(10_000));
        assert_eq!(
            changes,
            vec![
                SessionChange::DurationChanged(10_000),
                SessionChange::ElapsedChanged(10_000),
            ]
        );
    }

    #[test]
    fn playback_failed_returns_to_idle_and_reports() {
        let mut session = loaded_session();
        session.apply(EngineEvent::DurationChanged(10_000));
        let changes = session.apply(EngineEvent::PlaybackFailed("codec missing".into()));

        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.duration_millis(), 0);
        assert!(session.media_path().is_none());
        assert_eq!(
            changes.last(),
            Some(&SessionChange::Failed(EngineError::PlaybackFailed(
                "codec missing".into()
            )))
        );
    }

    #[test]
    fn projection_uses_elapsed_and_duration() {
        let mut session = loaded_session();
        session.apply(EngineEvent::DurationChanged(200_000));
        session.apply(EngineEvent::PositionChanged(65_000));
        assert_eq!(session.progress_label(), "01:05 / 03:20");
        assert_eq!(session.slider_value(), 325);
    }

    #[test]
    fn apply_sample_uses_the_same_guards() {
        let mut idle = PlaybackSession::default();
        idle.apply_sample(EngineSample {
            position_millis: 1_000,
            duration_millis: 2_000,
        });
        assert_eq!(idle.elapsed_millis(), 0);

        let mut session = loaded_session();
        session.apply_sample(EngineSample {
            position_millis: 1_000,
            duration_millis: 2_000,
        });
        assert_eq!(session.elapsed_millis(), 1_000);
        assert_eq!(session.duration_millis(), 2_000);
    }
}
