// SPDX-License-Identifier: MPL-2.0
//! Player page component.
//!
//! Owns the playback engine and the overlay controller and keeps them in
//! step: playback changes drained from the engine are forwarded to the
//! overlay through its explicit setters, input is forwarded as activity.
//! The view is a stack of the video surface and, while the overlay is
//! rendered, the transport bar.

use super::controls;
use crate::config::PlayerSettings;
use crate::error::EngineError;
use crate::overlay::{OverlayController, OverlayEffect, OverlayTimings};
use crate::player::{
    CommandOutcome, EngineBackend, FfmpegBackend, FrameSink, LoadOptions, PlaybackEngine,
    PlaybackSession, PlaybackState, SessionChange, TickGate, TransportCommand, TransportKey,
    TransportRouter, VolumePercent,
};
use crate::ui::design_tokens::typography;
use crate::ui::styles;
use iced::widget::{container, image, mouse_area, text, Column, Space, Stack};
use iced::{keyboard, mouse, ContentFit, Element, Length};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Tick rate while a fade is animating or video frames are being shown.
pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Messages handled by the player page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Controls(controls::Message),
    /// Pointer moved anywhere over the video.
    PointerMoved,
    OverlayEntered,
    OverlayExited,
    Key(TransportKey),
}

/// Side effects for the application root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Show a notice to the user.
    Notify(EngineError),
}

/// Maps a pressed key to a transport key, if it is one.
pub fn transport_key(key: &keyboard::Key) -> Option<TransportKey> {
    use keyboard::key::Named;

    match key {
        keyboard::Key::Named(Named::Space) => Some(TransportKey::Space),
        keyboard::Key::Named(Named::ArrowLeft) => Some(TransportKey::Left),
        keyboard::Key::Named(Named::ArrowRight) => Some(TransportKey::Right),
        keyboard::Key::Named(Named::ArrowUp) => Some(TransportKey::Up),
        keyboard::Key::Named(Named::ArrowDown) => Some(TransportKey::Down),
        _ => None,
    }
}

/// Player page state.
pub struct State {
    engine: PlaybackEngine<Box<dyn EngineBackend>>,
    router: TransportRouter,
    overlay: OverlayController,
    surface: FrameSink,
    frame: Option<image::Handle>,
    frame_revision: u64,
    /// Slider position while the progress bar is being dragged.
    seek_preview: Option<u32>,
    tick_gate: TickGate,
    /// The player page is the visible page.
    shown: bool,
    /// The window lost focus or was minimized.
    backgrounded: bool,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("engine", &self.engine)
            .field("overlay", &self.overlay)
            .field("seek_preview", &self.seek_preview)
            .finish_non_exhaustive()
    }
}

impl State {
    /// Player backed by FFmpeg.
    pub fn new(settings: &PlayerSettings, timings: OverlayTimings) -> Self {
        Self::with_backend(Box::new(FfmpegBackend::new()), settings, timings)
    }

    pub fn with_backend(
        backend: Box<dyn EngineBackend>,
        settings: &PlayerSettings,
        timings: OverlayTimings,
    ) -> Self {
        let surface = FrameSink::new();
        let options = LoadOptions {
            suppress_subtitles: settings.suppress_subtitles,
            surface: Some(surface.clone()),
        };

        Self {
            engine: PlaybackEngine::new(backend, settings.volume, options),
            router: TransportRouter::new(settings),
            overlay: OverlayController::new(timings),
            surface,
            frame: None,
            frame_revision: 0,
            seek_preview: None,
            tick_gate: TickGate::new(timings.tick.min(ANIMATION_FRAME)),
            shown: false,
            backgrounded: false,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        self.engine.session()
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn volume(&self) -> VolumePercent {
        self.engine.session().volume()
    }

    pub fn media_path(&self) -> Option<&Path> {
        self.engine.session().media_path()
    }

    /// Interval of the periodic tick while nothing is animating.
    pub fn tick_interval(&self) -> Duration {
        self.overlay.timings().tick
    }

    /// Whether the engine has anything to report: a load is pending or
    /// media is open.
    pub fn needs_ticks(&self) -> bool {
        self.engine.state() != PlaybackState::Idle
    }

    pub fn is_animating(&self) -> bool {
        self.overlay.is_animating()
    }

    /// Whether new frames keep arriving on the shown page, so the surface
    /// has to be refreshed at display rate.
    pub fn is_presenting(&self) -> bool {
        self.shown && self.engine.state().is_playing()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The player page became visible.
    pub fn activate(&mut self, now: Instant) {
        self.shown = true;
        self.tick_gate.reset();
        if !self.backgrounded {
            self.overlay.activate(now);
        }
    }

    /// The player page was left. Pending fades and countdowns are cancelled
    /// before this returns.
    pub fn deactivate(&mut self) {
        self.shown = false;
        self.seek_preview = None;
        self.overlay.deactivate();
    }

    /// The window lost focus or was minimized (`true`), or came back.
    ///
    /// Idle countdowns are disarmed while backgrounded and re-armed from
    /// scratch on return. Frames keep being presented either way.
    pub fn set_backgrounded(&mut self, backgrounded: bool, now: Instant) {
        if self.backgrounded == backgrounded {
            return;
        }
        self.backgrounded = backgrounded;
        if !self.shown {
            return;
        }
        if backgrounded {
            self.overlay.deactivate();
        } else {
            self.tick_gate.reset();
            self.overlay.activate(now);
        }
    }

    /// Starts loading `path`.
    pub fn open(&mut self, path: PathBuf, now: Instant) -> CommandOutcome {
        self.seek_preview = None;
        let outcome = self
            .router
            .route(TransportCommand::OpenFile(path), &mut self.engine);
        self.sync_overlay(now);
        outcome
    }

    /// Stops playback and returns to the "no video" placeholder.
    pub fn close(&mut self, now: Instant) {
        self.seek_preview = None;
        self.engine.unload();
        self.sync_overlay(now);
        self.refresh_frame();
    }

    // =========================================================================
    // Update
    // =========================================================================

    pub fn handle_message(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Controls(controls::Message::TogglePlayback) => {
                self.route(TransportCommand::TogglePause)
            }
            Message::Controls(controls::Message::SeekPreview(position)) => {
                self.seek_preview = Some(position);
                Effect::None
            }
            Message::Controls(controls::Message::SeekCommit) => match self.seek_preview.take() {
                Some(position) => self.route(TransportCommand::SeekToSlider(position)),
                None => Effect::None,
            },
            Message::Controls(controls::Message::SetVolume(percent)) => {
                self.route(TransportCommand::SetVolume(i32::from(percent)))
            }
            Message::PointerMoved => {
                self.overlay.pointer_moved(now);
                Effect::None
            }
            Message::OverlayEntered => {
                self.overlay.pointer_entered_overlay();
                Effect::None
            }
            Message::OverlayExited => {
                self.overlay.pointer_left_overlay(now);
                Effect::None
            }
            Message::Key(key) => {
                self.overlay.key_pressed(now);
                let command = self.router.command_for_key(key);
                self.route(command)
            }
        }
    }

    /// Periodic control-thread work: drains engine notifications, advances
    /// the overlay and picks up the latest decoded frame.
    ///
    /// Ticks arriving in a burst are coalesced.
    pub fn tick(&mut self, now: Instant) -> Effect {
        if !self.tick_gate.admit(now) {
            return Effect::None;
        }

        let mut failure = None;
        for change in self.engine.pump() {
            if let SessionChange::Failed(err) = change {
                failure = Some(err);
            }
        }
        self.sync_overlay(now);

        for effect in self.overlay.tick(now) {
            if let OverlayEffect::CursorVisibility(visible) = effect {
                log::trace!("Cursor visible: {visible}");
            }
        }

        self.refresh_frame();

        match failure {
            Some(err) => Effect::Notify(err),
            None => Effect::None,
        }
    }

    fn route(&mut self, command: TransportCommand) -> Effect {
        match self.router.route(command, &mut self.engine) {
            CommandOutcome::Failed(err) => Effect::Notify(err),
            CommandOutcome::Dispatched | CommandOutcome::Ignored | CommandOutcome::Opened => {
                Effect::None
            }
        }
    }

    /// Mirrors the playback state into the overlay controller.
    fn sync_overlay(&mut self, now: Instant) {
        let state = self.engine.state();
        self.overlay.set_media_present(state.has_media(), now);
        self.overlay.set_playing(state.is_playing(), now);
    }

    fn refresh_frame(&mut self) {
        let revision = self.surface.revision();
        if revision == self.frame_revision {
            return;
        }
        self.frame_revision = revision;
        self.frame = self.surface.latest().map(|frame| {
            image::Handle::from_rgba(frame.width, frame.height, frame.rgba.as_ref().clone())
        });
    }

    // =========================================================================
    // View
    // =========================================================================

    fn controls_state(&self, alpha: f32) -> controls::ViewState {
        let session = self.engine.session();
        controls::ViewState {
            playing: session.state().is_playing(),
            slider_value: self.seek_preview.unwrap_or_else(|| session.slider_value()),
            seekable: session.duration_millis() > 0,
            progress_label: session.progress_label(),
            volume: session.volume(),
            alpha,
        }
    }

    pub fn view(&self, now: Instant) -> Element<'_, Message> {
        let surface: Element<'_, Message> = match (self.engine.state(), &self.frame) {
            (PlaybackState::Idle, _) => placeholder("No video loaded"),
            (PlaybackState::Loading, _) => placeholder("Loading…"),
            (_, Some(handle)) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            (_, None) => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        let mut layers = Stack::new().push(
            container(surface)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::video_surface),
        );

        if self.overlay.is_overlay_rendered() {
            let bar = controls::view(&self.controls_state(self.overlay.opacity(now)))
                .map(Message::Controls);
            let bar = mouse_area(bar)
                .on_enter(Message::OverlayEntered)
                .on_exit(Message::OverlayExited);

            layers = layers.push(
                Column::new()
                    .push(Space::new().height(Length::Fill))
                    .push(bar),
            );
        }

        let area = mouse_area(layers).on_move(|_| Message::PointerMoved);
        if self.overlay.is_cursor_visible() {
            area.into()
        } else {
            area.interaction(mouse::Interaction::Hidden).into()
        }
    }
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(typography::TITLE_SM))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::test_backend::{Call, RecordingBackend};
    use crate::player::EngineEvent;
    use crate::test_utils::VirtualClock;
    use tempfile::NamedTempFile;

    fn player() -> (State, RecordingBackend) {
        let backend = RecordingBackend::default();
        let state = State::with_backend(
            Box::new(backend.clone()),
            &PlayerSettings::default(),
            OverlayTimings::default(),
        );
        (state, backend)
    }

    /// Active page playing a 60 s clip.
    fn playing(clock: &mut VirtualClock) -> (State, RecordingBackend, NamedTempFile) {
        let (mut state, backend) = player();
        let file = NamedTempFile::new().expect("temp file");
        state.activate(clock.now());
        let outcome = state.open(file.path().to_path_buf(), clock.now());
        assert_eq!(outcome, CommandOutcome::Opened);

        backend.emit(EngineEvent::FileLoaded);
        backend.emit(EngineEvent::DurationChanged(60_000));
        state.tick(clock.advance_ms(100));
        (state, backend, file)
    }

    fn run_for(state: &mut State, clock: &mut VirtualClock, millis: u64) {
        for _ in 0..millis / 100 {
            state.tick(clock.advance_ms(100));
        }
    }

    #[test]
    fn transport_keys_are_mapped() {
        use keyboard::key::Named;

        assert_eq!(
            transport_key(&keyboard::Key::Named(Named::Space)),
            Some(TransportKey::Space)
        );
        assert_eq!(
            transport_key(&keyboard::Key::Named(Named::ArrowDown)),
            Some(TransportKey::Down)
        );
        assert_eq!(transport_key(&keyboard::Key::Named(Named::Escape)), None);
        assert_eq!(transport_key(&keyboard::Key::Character("f".into())), None);
    }

    #[test]
    fn file_loaded_shows_overlay_and_arms_countdown() {
        let mut clock = VirtualClock::new();
        let (state, _backend, _file) = playing(&mut clock);

        assert_eq!(state.session().state(), PlaybackState::Playing);
        assert!(state.overlay().is_overlay_rendered());
        assert!(state.overlay().overlay_deadline().is_some());
    }

    #[test]
    fn loading_keeps_overlay_detached() {
        let mut clock = VirtualClock::new();
        let (mut state, _backend) = player();
        let file = NamedTempFile::new().expect("temp file");
        state.activate(clock.now());
        state.open(file.path().to_path_buf(), clock.now());
        state.tick(clock.advance_ms(100));

        assert_eq!(state.session().state(), PlaybackState::Loading);
        assert!(!state.overlay().is_overlay_rendered());
        assert!(state.needs_ticks());
    }

    #[test]
    fn missing_file_notifies_and_stays_idle() {
        let mut clock = VirtualClock::new();
        let (mut state, _backend) = player();
        let outcome = state.open(PathBuf::from("/no/such/clip.mp4"), clock.advance_ms(1));

        assert!(matches!(
            outcome,
            CommandOutcome::Failed(EngineError::NotFound(_))
        ));
        assert_eq!(state.session().state(), PlaybackState::Idle);
        assert!(!state.needs_ticks());
    }

    #[test]
    fn idle_hides_overlay_and_pointer_brings_it_back() {
        let mut clock = VirtualClock::new();
        let (mut state, _backend, _file) = playing(&mut clock);

        run_for(&mut state, &mut clock, 3_500);
        assert!(!state.overlay().is_overlay_rendered());
        assert!(!state.overlay().is_cursor_visible());

        let now = clock.advance_ms(10);
        state.handle_message(Message::PointerMoved, now);
        assert!(state.overlay().is_overlay_rendered());
        assert!(state.overlay().is_cursor_visible());
        assert_eq!(
            state.overlay().overlay_deadline(),
            Some(now + Duration::from_millis(3000))
        );
    }

    #[test]
    fn key_press_counts_as_activity_and_dispatches() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);

        let now = clock.advance_ms(2_000);
        state.handle_message(Message::Key(TransportKey::Space), now);
        assert_eq!(backend.calls().last(), Some(&Call::TogglePause));
        assert_eq!(
            state.overlay().overlay_deadline(),
            Some(now + Duration::from_millis(3000))
        );
    }

    #[test]
    fn seek_is_only_sent_on_slider_release() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);
        let now = clock.advance_ms(10);

        state.handle_message(Message::Controls(controls::Message::SeekPreview(500)), now);
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::SeekTo(_))));
        assert_eq!(state.controls_state(1.0).slider_value, 500);

        state.handle_message(Message::Controls(controls::Message::SeekCommit), now);
        assert_eq!(backend.calls().last(), Some(&Call::SeekTo(30_000)));

        // A stray release without a drag does nothing.
        let before = backend.calls().len();
        state.handle_message(Message::Controls(controls::Message::SeekCommit), now);
        assert_eq!(backend.calls().len(), before);
    }

    #[test]
    fn playback_failure_surfaces_as_notice_and_hides_overlay() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);

        backend.emit(EngineEvent::PlaybackFailed("decoder vanished".into()));
        let effect = state.tick(clock.advance_ms(100));

        assert!(matches!(
            effect,
            Effect::Notify(EngineError::PlaybackFailed(_))
        ));
        assert_eq!(state.session().state(), PlaybackState::Idle);
        assert!(!state.overlay().is_overlay_rendered());
    }

    #[test]
    fn deactivate_mid_fade_lands_visible_and_disarmed() {
        let mut clock = VirtualClock::new();
        let (mut state, _backend, _file) = playing(&mut clock);

        run_for(&mut state, &mut clock, 3_100);
        assert!(state.is_animating());

        state.deactivate();
        let overlay = state.overlay().state(clock.now());
        assert!(overlay.visible);
        assert!(overlay.cursor_visible);
        assert!(overlay.fade.is_none());
        assert!(state.overlay().overlay_deadline().is_none());
        assert!(state.overlay().cursor_deadline().is_none());
    }

    #[test]
    fn volume_slider_updates_session() {
        let mut clock = VirtualClock::new();
        let (mut state, backend) = player();
        state.handle_message(
            Message::Controls(controls::Message::SetVolume(40)),
            clock.advance_ms(1),
        );
        assert_eq!(state.volume().value(), 40);
        assert_eq!(backend.calls().last(), Some(&Call::SetVolume(40)));
    }

    #[test]
    fn playing_on_a_visible_page_presents_frames() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);
        assert!(!state.is_animating());
        assert!(state.is_presenting());

        backend.emit(EngineEvent::PauseChanged(true));
        state.tick(clock.advance_ms(100));
        assert!(!state.is_presenting());

        backend.emit(EngineEvent::PauseChanged(false));
        state.tick(clock.advance_ms(100));
        state.set_backgrounded(true, clock.now());
        assert!(state.is_presenting());

        state.deactivate();
        assert!(!state.is_presenting());
    }

    #[test]
    fn backgrounding_disarms_idle_countdowns_until_return() {
        let mut clock = VirtualClock::new();
        let (mut state, _backend, _file) = playing(&mut clock);

        state.set_backgrounded(true, clock.now());
        assert!(!state.overlay().is_active());
        run_for(&mut state, &mut clock, 5_000);
        assert!(state.overlay().is_overlay_rendered());
        assert!(state.overlay().is_cursor_visible());

        // Navigating while backgrounded must not re-arm anything.
        state.deactivate();
        state.activate(clock.now());
        assert!(!state.overlay().is_active());

        state.set_backgrounded(false, clock.now());
        assert!(state.overlay().is_active());
        run_for(&mut state, &mut clock, 5_000);
        assert!(!state.overlay().is_overlay_rendered());
    }

    #[test]
    fn close_unloads_and_detaches_overlay() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);

        state.close(clock.advance_ms(10));

        assert_eq!(state.session().state(), PlaybackState::Idle);
        assert!(state.media_path().is_none());
        assert!(!state.overlay().is_overlay_rendered());
        assert!(!state.needs_ticks());
        assert_eq!(backend.calls().last(), Some(&Call::Stop));
    }

    #[test]
    fn burst_ticks_are_coalesced() {
        let mut clock = VirtualClock::new();
        let (mut state, backend, _file) = playing(&mut clock);

        state.tick(clock.advance_ms(100));
        backend.emit(EngineEvent::PositionChanged(1_000));
        state.tick(clock.advance_ms(1));
        assert_eq!(state.session().elapsed_millis(), 0);

        state.tick(clock.advance_ms(100));
        assert_eq!(state.session().elapsed_millis(), 1_000);
    }
}
