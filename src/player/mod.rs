// SPDX-License-Identifier: MPL-2.0
//! Playback core: engine adapter, state machine and transport routing.
//!
//! Data flows one way: UI input goes through the [`TransportRouter`] into the
//! [`PlaybackEngine`], which calls an [`EngineBackend`]. The backend reports
//! back asynchronously through a [`Notifier`]; the engine drains those
//! notifications on the control thread and applies them to the
//! [`PlaybackSession`], producing [`SessionChange`]s for the UI.

mod audio_output;
mod backend;
mod engine;
mod ffmpeg_backend;
mod frame_sink;
mod notifier;
mod router;
mod session;
mod tick;
pub mod time_format;
mod volume;

pub use backend::{EngineBackend, EngineEvent, EngineSample, LoadOptions};
pub use engine::PlaybackEngine;
#[cfg(test)]
pub(crate) use engine::test_backend;
pub use ffmpeg_backend::FfmpegBackend;
pub use frame_sink::{FrameSink, VideoFrame};
pub use notifier::{NotificationQueue, Notifier, SessionId};
pub use router::{CommandOutcome, TransportCommand, TransportKey, TransportRouter};
pub use session::{PlaybackSession, PlaybackState, SessionChange};
pub use tick::TickGate;
pub use volume::VolumePercent;
