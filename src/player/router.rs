// SPDX-License-Identifier: MPL-2.0
//! Transport command router.
//!
//! Maps discrete UI events (slider drags, buttons, arrow keys) to
//! [`PlaybackEngine`] calls. Commands that make no sense in the current state
//! are reported as [`CommandOutcome::Ignored`] and otherwise stay silent.

use super::backend::EngineBackend;
use super::engine::PlaybackEngine;
use super::time_format;
use crate::config::PlayerSettings;
use crate::error::EngineError;
use std::path::PathBuf;
use std::time::Duration;

/// Keys the player page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKey {
    Space,
    Left,
    Right,
    Up,
    Down,
}

/// A validated-on-dispatch transport request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    /// Progress slider released at `0..=SLIDER_MAX`.
    SeekToSlider(u32),
    /// Volume slider moved to a percentage (clamped on dispatch).
    SetVolume(i32),
    TogglePause,
    /// Relative seek in milliseconds, negative to rewind.
    SeekRelative(i64),
    /// Relative volume change in percentage points.
    AdjustVolume(i32),
    OpenFile(PathBuf),
}

/// What happened to a routed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Sent to the engine.
    Dispatched,
    /// Not applicable in the current state. Not an error.
    Ignored,
    /// A load started; the UI should switch to the player page.
    Opened,
    /// The load was rejected.
    Failed(EngineError),
}

impl CommandOutcome {
    fn from_dispatch(dispatched: bool) -> Self {
        if dispatched {
            Self::Dispatched
        } else {
            Self::Ignored
        }
    }
}

/// Routes transport commands using the configured step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportRouter {
    seek_step: Duration,
    volume_step: u8,
}

impl Default for TransportRouter {
    fn default() -> Self {
        Self::new(&PlayerSettings::default())
    }
}

impl TransportRouter {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            seek_step: settings.seek_step,
            volume_step: settings.volume_step,
        }
    }

    pub fn seek_step(&self) -> Duration {
        self.seek_step
    }

    pub fn volume_step(&self) -> u8 {
        self.volume_step
    }

    /// Keyboard mapping: Space toggles, Left/Right seek, Up/Down change volume.
    pub fn command_for_key(&self, key: TransportKey) -> TransportCommand {
        let seek = i64::try_from(self.seek_step.as_millis()).unwrap_or(i64::MAX);
        let volume = i32::from(self.volume_step);
        match key {
            TransportKey::Space => TransportCommand::TogglePause,
            TransportKey::Left => TransportCommand::SeekRelative(-seek),
            TransportKey::Right => TransportCommand::SeekRelative(seek),
            TransportKey::Up => TransportCommand::AdjustVolume(volume),
            TransportKey::Down => TransportCommand::AdjustVolume(-volume),
        }
    }

    /// Dispatches `command` to `engine` after validation.
    pub fn route<B: EngineBackend>(
        &self,
        command: TransportCommand,
        engine: &mut PlaybackEngine<B>,
    ) -> CommandOutcome {
        let outcome = match command {
            TransportCommand::SeekToSlider(position) => {
                let duration = engine.session().duration_millis();
                if duration == 0 {
                    CommandOutcome::Ignored
                } else {
                    let target = time_format::slider_to_millis(position, duration);
                    CommandOutcome::from_dispatch(engine.seek(target))
                }
            }
            TransportCommand::SetVolume(percent) => {
                engine.set_volume(percent);
                CommandOutcome::Dispatched
            }
            TransportCommand::TogglePause => {
                CommandOutcome::from_dispatch(engine.toggle_pause())
            }
            TransportCommand::SeekRelative(delta) => {
                let session = engine.session();
                if !session.has_media() {
                    CommandOutcome::Ignored
                } else {
                    let target = offset_millis(session.elapsed_millis(), delta);
                    CommandOutcome::from_dispatch(engine.seek(target))
                }
            }
            TransportCommand::AdjustVolume(delta) => {
                let target = engine.session().volume().adjusted(delta);
                engine.set_volume(i32::from(target.value()));
                CommandOutcome::Dispatched
            }
            TransportCommand::OpenFile(path) => match engine.load(&path) {
                Ok(()) => CommandOutcome::Opened,
                Err(err) => CommandOutcome::Failed(err),
            },
        };

        if outcome == CommandOutcome::Ignored {
            log::trace!("Transport command ignored in {:?}", engine.state());
        }
        outcome
    }

    /// Shorthand for `route(command_for_key(key))`.
    pub fn handle_key<B: EngineBackend>(
        &self,
        key: TransportKey,
        engine: &mut PlaybackEngine<B>,
    ) -> CommandOutcome {
        self.route(self.command_for_key(key), engine)
    }
}

/// `base + delta`, saturating at zero. The engine clamps the upper end.
fn offset_millis(base: u64, delta: i64) -> u64 {
    if delta >= 0 {
        base.saturating_add(delta.unsigned_abs())
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}
