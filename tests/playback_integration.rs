// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the playback core.
//!
//! Drives the public engine, router and overlay API with a scripted backend
//! that records every call and posts notifications from its own thread, the
//! way a real decoder thread does.

use klydio::config::{PlayerSettings, SLIDER_MAX};
use klydio::error::EngineError;
use klydio::overlay::{OverlayController, OverlayTimings};
use klydio::player::time_format::{format_clock, parse_clock};
use klydio::player::{
    CommandOutcome, EngineBackend, EngineEvent, LoadOptions, Notifier, PlaybackEngine,
    PlaybackState, TransportCommand, TransportKey, TransportRouter, VolumePercent,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

// =============================================================================
// Scripted backend
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Open(PathBuf),
    TogglePause,
    SeekTo(u64),
    SetVolume(u8),
    Stop,
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<Call>,
    notifier: Option<Notifier>,
    reject: Option<EngineError>,
}

#[derive(Debug, Clone, Default)]
struct ScriptedBackend {
    script: Arc<Mutex<Script>>,
}

impl ScriptedBackend {
    fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    fn seeks(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SeekTo(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    fn notifier(&self) -> Notifier {
        self.script
            .lock()
            .unwrap()
            .notifier
            .clone()
            .expect("no session open")
    }

    /// Posts `events` from a separate thread and waits for it to finish.
    fn emit_from_engine_thread(&self, events: Vec<EngineEvent>) {
        let notifier = self.notifier();
        thread::spawn(move || {
            for event in events {
                notifier.notify(event);
            }
        })
        .join()
        .expect("engine thread panicked");
    }
}

impl EngineBackend for ScriptedBackend {
    fn open(
        &mut self,
        path: &Path,
        _options: &LoadOptions,
        notifier: Notifier,
    ) -> Result<(), EngineError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Open(path.to_path_buf()));
        if let Some(err) = script.reject.clone() {
            return Err(err);
        }
        script.notifier = Some(notifier);
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.script.lock().unwrap().calls.push(Call::TogglePause);
    }

    fn seek_to(&mut self, target_millis: u64) {
        self.script
            .lock()
            .unwrap()
            .calls
            .push(Call::SeekTo(target_millis));
    }

    fn set_volume(&mut self, volume: VolumePercent) {
        self.script
            .lock()
            .unwrap()
            .calls
            .push(Call::SetVolume(volume.value()));
    }

    fn stop(&mut self) {
        self.script.lock().unwrap().calls.push(Call::Stop);
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn new_engine() -> (PlaybackEngine<ScriptedBackend>, ScriptedBackend) {
    let backend = ScriptedBackend::default();
    let engine = PlaybackEngine::new(
        backend.clone(),
        VolumePercent::default(),
        LoadOptions::default(),
    );
    (engine, backend)
}

/// Engine playing a clip of `duration_millis`.
fn playing_engine(
    duration_millis: u64,
) -> (PlaybackEngine<ScriptedBackend>, ScriptedBackend, NamedTempFile) {
    let (mut engine, backend) = new_engine();
    let file = NamedTempFile::new().expect("temp file");
    engine.load(file.path()).expect("load");
    backend.emit_from_engine_thread(vec![
        EngineEvent::FileLoaded,
        EngineEvent::DurationChanged(duration_millis),
    ]);
    engine.pump();
    (engine, backend, file)
}

/// Overlay on an active player page with media playing.
fn playing_overlay(now: Instant) -> OverlayController {
    let mut overlay = OverlayController::new(OverlayTimings::default());
    overlay.activate(now);
    overlay.set_media_present(true, now);
    overlay.set_playing(true, now);
    overlay
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Ticks the overlay every 100 ms from `start` (exclusive) to `end`.
fn tick_overlay(overlay: &mut OverlayController, start: Instant, end: Instant) {
    let mut now = start;
    while now < end {
        now += ms(100);
        overlay.tick(now);
    }
}

// =============================================================================
// Engine and state machine
// =============================================================================

#[test]
fn test_load_then_file_loaded_starts_playing_and_shows_overlay() {
    let (mut engine, backend) = new_engine();
    let file = NamedTempFile::new().expect("temp file");
    let t0 = Instant::now();
    let mut overlay = OverlayController::new(OverlayTimings::default());
    overlay.activate(t0);

    engine.load(file.path()).expect("load");
    assert_eq!(engine.state(), PlaybackState::Loading);
    assert_eq!(backend.calls().last(), Some(&Call::Open(file.path().to_path_buf())));

    backend.emit_from_engine_thread(vec![EngineEvent::FileLoaded]);
    engine.pump();
    assert_eq!(engine.state(), PlaybackState::Playing);

    overlay.set_media_present(engine.session().has_media(), t0);
    overlay.set_playing(engine.state().is_playing(), t0);
    assert!(overlay.is_overlay_rendered());
    assert!(overlay.overlay_deadline().is_some());
}

#[test]
fn test_missing_file_is_not_found_and_stays_idle() {
    let (mut engine, backend) = new_engine();
    let result = engine.load("/definitely/not/here.mp4");

    assert!(matches!(result, Err(EngineError::NotFound(_))));
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(!backend.calls().iter().any(|c| matches!(c, Call::Open(_))));
}

#[test]
fn test_backend_rejection_surfaces_unsupported_format() {
    let (mut engine, backend) = new_engine();
    backend.script.lock().unwrap().reject =
        Some(EngineError::UnsupportedFormat("no video stream".into()));
    let file = NamedTempFile::new().expect("temp file");

    let router = TransportRouter::default();
    let outcome = router.route(
        TransportCommand::OpenFile(file.path().to_path_buf()),
        &mut engine,
    );

    assert!(matches!(
        outcome,
        CommandOutcome::Failed(EngineError::UnsupportedFormat(_))
    ));
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[test]
fn test_toggle_pause_while_idle_makes_no_engine_call() {
    let (mut engine, backend) = new_engine();
    let before = backend.calls();

    let outcome = TransportRouter::default().handle_key(TransportKey::Space, &mut engine);

    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(backend.calls(), before);
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[test]
fn test_pause_state_follows_engine_notifications() {
    let (mut engine, backend, _file) = playing_engine(60_000);

    assert!(engine.toggle_pause());
    // Fire-and-forget: nothing changes until the engine confirms.
    assert_eq!(engine.state(), PlaybackState::Playing);

    backend.emit_from_engine_thread(vec![EngineEvent::PauseChanged(true)]);
    engine.pump();
    assert_eq!(engine.state(), PlaybackState::Paused);

    backend.emit_from_engine_thread(vec![EngineEvent::PauseChanged(false)]);
    engine.pump();
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn test_progress_while_loading_is_ignored() {
    let (mut engine, backend) = new_engine();
    let file = NamedTempFile::new().expect("temp file");
    engine.load(file.path()).expect("load");

    backend.emit_from_engine_thread(vec![
        EngineEvent::PositionChanged(5_000),
        EngineEvent::DurationChanged(60_000),
    ]);
    engine.pump();

    assert_eq!(engine.state(), PlaybackState::Loading);
    assert_eq!(engine.session().elapsed_millis(), 0);
    assert_eq!(engine.session().duration_millis(), 0);
}

#[test]
fn test_stale_notifications_from_previous_file_are_dropped() {
    let (mut engine, backend, _first) = playing_engine(60_000);
    let old_notifier = backend.notifier();

    let second = NamedTempFile::new().expect("temp file");
    engine.load(second.path()).expect("load");
    thread::spawn(move || {
        old_notifier.notify(EngineEvent::FileLoaded);
        old_notifier.notify(EngineEvent::DurationChanged(90_000));
        old_notifier.notify(EngineEvent::PositionChanged(45_000));
    })
    .join()
    .expect("engine thread panicked");
    engine.pump();

    assert_eq!(engine.state(), PlaybackState::Loading);
    assert_eq!(engine.session().duration_millis(), 0);
    assert_eq!(engine.session().elapsed_millis(), 0);

    backend.emit_from_engine_thread(vec![
        EngineEvent::FileLoaded,
        EngineEvent::DurationChanged(30_000),
    ]);
    engine.pump();
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(engine.session().duration_millis(), 30_000);
}

#[test]
fn test_playback_failure_returns_to_idle() {
    let (mut engine, backend, _file) = playing_engine(60_000);

    backend.emit_from_engine_thread(vec![EngineEvent::PlaybackFailed("device busy".into())]);
    let changes = engine.pump();

    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(changes
        .iter()
        .any(|c| matches!(c, klydio::player::SessionChange::Failed(_))));
    assert_eq!(backend.calls().last(), Some(&Call::Stop));
}

// =============================================================================
// Transport routing
// =============================================================================

#[test]
fn test_seek_requests_are_always_clamped() {
    let duration = 90_000;
    let (mut engine, backend, _file) = playing_engine(duration);

    for target in [0, 1, duration - 1, duration, duration + 1, u64::MAX] {
        assert!(engine.seek(target));
    }
    for position in [0, SLIDER_MAX / 2, SLIDER_MAX, SLIDER_MAX + 1, u32::MAX] {
        TransportRouter::default().route(TransportCommand::SeekToSlider(position), &mut engine);
    }

    let seeks = backend.seeks();
    assert_eq!(seeks.len(), 11);
    assert!(seeks.iter().all(|&t| t <= duration));
}

#[test]
fn test_arrow_keys_seek_by_configured_step() {
    let (mut engine, backend, _file) = playing_engine(60_000);
    backend.emit_from_engine_thread(vec![EngineEvent::PositionChanged(58_000)]);
    engine.pump();

    let router = TransportRouter::new(&PlayerSettings::default());
    router.handle_key(TransportKey::Right, &mut engine);
    router.handle_key(TransportKey::Left, &mut engine);

    assert_eq!(backend.seeks(), vec![60_000, 53_000]);
}

#[test]
fn test_slider_seek_with_unknown_duration_is_ignored() {
    let (mut engine, backend) = new_engine();
    let file = NamedTempFile::new().expect("temp file");
    engine.load(file.path()).expect("load");
    backend.emit_from_engine_thread(vec![EngineEvent::FileLoaded]);
    engine.pump();

    let outcome =
        TransportRouter::default().route(TransportCommand::SeekToSlider(500), &mut engine);

    assert_eq!(outcome, CommandOutcome::Ignored);
    assert!(backend.seeks().is_empty());
}

#[test]
fn test_volume_always_stays_in_range() {
    let (mut engine, backend) = new_engine();
    let router = TransportRouter::default();

    for delta in [i32::MIN, -1_000, -5, 0, 5, 1_000, i32::MAX] {
        router.route(TransportCommand::AdjustVolume(delta), &mut engine);
        assert!(engine.session().volume().value() <= 100);
    }
    for percent in [i32::MIN, -1, 0, 50, 100, 101, i32::MAX] {
        router.route(TransportCommand::SetVolume(percent), &mut engine);
        assert!(engine.session().volume().value() <= 100);
    }

    assert!(backend
        .calls()
        .iter()
        .all(|c| !matches!(c, Call::SetVolume(v) if *v > 100)));
}

#[test]
fn test_volume_keys_step_by_five() {
    let (mut engine, _backend) = new_engine();
    let router = TransportRouter::default();
    engine.set_volume(50);

    router.handle_key(TransportKey::Up, &mut engine);
    assert_eq!(engine.session().volume().value(), 55);
    router.handle_key(TransportKey::Down, &mut engine);
    router.handle_key(TransportKey::Down, &mut engine);
    assert_eq!(engine.session().volume().value(), 45);
}

// =============================================================================
// Overlay
// =============================================================================

#[test]
fn test_idle_hides_overlay_and_pointer_restores_it() {
    let t0 = Instant::now();
    let mut overlay = playing_overlay(t0);

    tick_overlay(&mut overlay, t0, t0 + ms(3_500));
    assert!(!overlay.is_overlay_rendered());
    assert!(!overlay.is_cursor_visible());

    let moved = t0 + ms(3_510);
    overlay.pointer_moved(moved);
    assert!(overlay.is_overlay_rendered());
    assert!(overlay.is_cursor_visible());
    assert_eq!(overlay.overlay_deadline(), Some(moved + ms(3_000)));

    tick_overlay(&mut overlay, moved, moved + ms(400));
    assert!((overlay.opacity(moved + ms(400)) - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_hovering_overlay_suppresses_idle_hide() {
    let t0 = Instant::now();
    let mut overlay = playing_overlay(t0);
    overlay.pointer_entered_overlay();

    tick_overlay(&mut overlay, t0, t0 + ms(10_000));
    assert!(overlay.is_overlay_rendered());
    assert!(overlay.is_cursor_visible());
}

#[test]
fn test_no_media_never_shows_overlay() {
    let t0 = Instant::now();
    let mut overlay = OverlayController::new(OverlayTimings::default());
    overlay.activate(t0);
    overlay.pointer_moved(t0 + ms(10));
    overlay.key_pressed(t0 + ms(20));

    assert!(!overlay.is_overlay_rendered());
    assert_eq!(overlay.opacity(t0 + ms(30)), 0.0);
}

#[test]
fn test_deactivating_mid_fade_out_lands_visible_and_disarmed() {
    let t0 = Instant::now();
    let mut overlay = playing_overlay(t0);

    tick_overlay(&mut overlay, t0, t0 + ms(3_100));
    assert!(overlay.is_animating());

    overlay.deactivate();
    let later = t0 + ms(10_000);
    let state = overlay.state(later);
    assert!(state.visible);
    assert!(state.cursor_visible);
    assert!(state.fade.is_none());
    assert!(overlay.overlay_deadline().is_none());
    assert!(overlay.cursor_deadline().is_none());
    assert!(overlay.tick(later).is_empty());
}

// =============================================================================
// Time projection
// =============================================================================

#[test]
fn test_clock_round_trip_is_within_one_second() {
    for t in (0..=7_200_000u64).step_by(7_919) {
        let parsed = parse_clock(&format_clock(t)).expect("parse");
        assert!(t - parsed < 1_000, "{t} -> {parsed}");
    }
}
