// SPDX-License-Identifier: MPL-2.0
//! Playback engine adapter.
//!
//! [`PlaybackEngine`] is the only owner of the [`PlaybackSession`]. It turns
//! transport requests into backend calls (validating and clamping them on the
//! way) and folds the backend's notifications back into the session when the
//! control thread pumps it.

use super::backend::{EngineBackend, LoadOptions};
use super::notifier::NotificationQueue;
use super::session::{PlaybackSession, PlaybackState, SessionChange};
use super::volume::VolumePercent;
use crate::error::EngineError;
use std::path::Path;

/// Drives one backend and owns the session it plays.
pub struct PlaybackEngine<B: EngineBackend> {
    backend: B,
    session: PlaybackSession,
    queue: NotificationQueue,
    options: LoadOptions,
}

impl<B: EngineBackend> PlaybackEngine<B> {
    /// Wraps `backend` and pushes the initial volume to it.
    pub fn new(mut backend: B, volume: VolumePercent, options: LoadOptions) -> Self {
        backend.set_volume(volume);
        Self {
            backend,
            session: PlaybackSession::new(volume),
            queue: NotificationQueue::new(),
            options,
        }
    }

    /// Read-only view of the session.
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Starts loading `path`.
    ///
    /// Returns once the backend accepted the request; `FileLoaded` arrives
    /// later. On failure the session is left `Idle`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();

        if self.session.state() != PlaybackState::Idle {
            self.backend.stop();
        }
        self.queue.end_session();

        if !path.exists() {
            self.session.unload();
            return Err(EngineError::NotFound(path.to_path_buf()));
        }

        let notifier = self.queue.begin_session();
        if let Err(err) = self.backend.open(path, &self.options, notifier) {
            log::warn!("Failed to load {}: {}", path.display(), err);
            self.queue.end_session();
            self.session.unload();
            return Err(err);
        }

        log::info!("Loading {}", path.display());
        self.session.begin_load(path);
        Ok(())
    }

    /// Flips play/pause. Returns `false` (nothing dispatched) unless media is
    /// open. The state itself changes when the engine confirms it.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.session.has_media() {
            return false;
        }
        self.backend.toggle_pause();
        true
    }

    /// Requests an absolute seek, clamped to `[0, duration]`.
    ///
    /// Returns `false` while the duration is unknown.
    pub fn seek(&mut self, target_millis: u64) -> bool {
        let duration = self.session.duration_millis();
        if duration == 0 {
            return false;
        }
        self.backend.seek_to(target_millis.min(duration));
        true
    }

    /// Sets the volume, clamping `percent` into `0..=100`.
    pub fn set_volume(&mut self, percent: i32) -> VolumePercent {
        let volume = VolumePercent::new(percent);
        self.session.set_volume(volume);
        self.backend.set_volume(volume);
        volume
    }

    /// Stops playback and returns to `Idle`.
    pub fn unload(&mut self) -> Option<SessionChange> {
        self.backend.stop();
        self.queue.end_session();
        self.session.unload()
    }

    /// Applies every pending notification, then polls the backend if it
    /// supports sampling. Call from the control thread only.
    pub fn pump(&mut self) -> Vec<SessionChange> {
        let mut changes = Vec::new();
        for event in self.queue.drain() {
            changes.extend(self.session.apply(event));
        }
        if let Some(sample) = self.backend.sample() {
            changes.extend(self.session.apply_sample(sample));
        }
        if changes
            .iter()
            .any(|c| matches!(c, SessionChange::Failed(_)))
        {
            self.backend.stop();
            self.queue.end_session();
        }
        changes
    }
}

impl<B: EngineBackend> Drop for PlaybackEngine<B> {
    fn drop(&mut self) {
        self.backend.stop();
    }
}

impl<B: EngineBackend> std::fmt::Debug for PlaybackEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_backend {
    //! Recording backend used by the unit tests of this crate.

    use super::super::backend::{EngineBackend, EngineEvent, EngineSample, LoadOptions};
    use super::super::notifier::Notifier;
    use super::super::volume::VolumePercent;
    use crate::error::EngineError;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Open(PathBuf),
        TogglePause,
        SeekTo(u64),
        SetVolume(u8),
        Stop,
    }

    #[derive(Debug, Default)]
    pub struct Shared {
        pub calls: Vec<Call>,
        pub notifier: Option<Notifier>,
        pub reject_with: Option<EngineError>,
        pub sample: Option<EngineSample>,
    }

    /// Backend that records calls; tests emit notifications by hand.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingBackend {
        pub shared: Arc<Mutex<Shared>>,
    }

    impl RecordingBackend {
        pub fn calls(&self) -> Vec<Call> {
            self.shared.lock().unwrap().calls.clone()
        }

        pub fn emit(&self, event: EngineEvent) {
            let shared = self.shared.lock().unwrap();
            shared
                .notifier
                .as_ref()
                .expect("no session open")
                .notify(event);
        }

        pub fn notifier(&self) -> Notifier {
            self.shared
                .lock()
                .unwrap()
                .notifier
                .clone()
                .expect("no session open")
        }
    }

    impl EngineBackend for RecordingBackend {
        fn open(
            &mut self,
            path: &Path,
            _options: &LoadOptions,
            notifier: Notifier,
        ) -> Result<(), EngineError> {
            let mut shared = self.shared.lock().unwrap();
            shared.calls.push(Call::Open(path.to_path_buf()));
            if let Some(err) = shared.reject_with.clone() {
                return Err(err);
            }
            shared.notifier = Some(notifier);
            Ok(())
        }

        fn toggle_pause(&mut self) {
            self.shared.lock().unwrap().calls.push(Call::TogglePause);
        }

        fn seek_to(&mut self, target_millis: u64) {
            self.shared
                .lock()
                .unwrap()
                .calls
                .push(Call::SeekTo(target_millis));
        }

        fn set_volume(&mut self, volume: VolumePercent) {
            self.shared
                .lock()
                .unwrap()
                .calls
                .push(Call::SetVolume(volume.value()));
        }

        fn stop(&mut self) {
            self.shared.lock().unwrap().calls.push(Call::Stop);
        }

        fn sample(&self) -> Option<EngineSample> {
            self.shared.lock().unwrap().sample
        }
    }
}
