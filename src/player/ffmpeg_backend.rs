// SPDX-License-Identifier: MPL-2.0
//! Production backend decoding with FFmpeg.
//!
//! `open` probes the file on the caller's thread so that missing files and
//! unsupported containers fail synchronously, then hands decoding to a
//! dedicated worker thread. The worker owns every FFmpeg object and the
//! audio output, presents RGBA frames into the [`FrameSink`] and reports
//! progress through its [`Notifier`].

use super::audio_output::{AudioOutput, SharedVolume};
use super::backend::{EngineBackend, EngineEvent, LoadOptions};
use super::frame_sink::{FrameSink, VideoFrame};
use super::notifier::Notifier;
use super::volume::VolumePercent;
use crate::error::EngineError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

static FFMPEG_INIT: Once = Once::new();

/// Minimum spacing between two `PositionChanged` reports during playback.
const POSITION_REPORT_INTERVAL: Duration = Duration::from_millis(200);

/// Sleep while paused, so the worker does not spin.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// FFmpeg's internal time base (microseconds).
const AV_TIME_BASE: i64 = 1_000_000;

/// Frames decoded past a seek point before giving up on reaching the target.
const MAX_SEEK_FRAMES: u32 = 1000;

/// Initializes FFmpeg once per process and silences its console logging.
fn init_ffmpeg() -> Result<(), EngineError> {
    let mut result = Ok(());
    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            result = Err(EngineError::PlaybackFailed(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }
        // SAFETY: av_log_set_level only changes a global log threshold.
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });
    result
}

#[derive(Debug)]
enum WorkerCommand {
    TogglePause,
    Seek(u64),
    Stop,
}

/// [`EngineBackend`] on top of `ffmpeg-next`.
///
/// The best video stream is shown and the best audio stream, if any, is
/// played on the default output device. Subtitle streams are never rendered.
#[derive(Debug, Default)]
pub struct FfmpegBackend {
    commands: Option<mpsc::UnboundedSender<WorkerCommand>>,
    surface: Option<FrameSink>,
    volume: SharedVolume,
}

impl FfmpegBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> VolumePercent {
        self.volume.get()
    }

    fn send(&self, command: WorkerCommand) {
        if let Some(tx) = &self.commands {
            if tx.send(command).is_err() {
                log::debug!("Decoder worker already exited");
            }
        }
    }
}

impl EngineBackend for FfmpegBackend {
    fn open(
        &mut self,
        path: &Path,
        options: &LoadOptions,
        notifier: Notifier,
    ) -> Result<(), EngineError> {
        self.stop();
        init_ffmpeg()?;

        let duration_millis = probe(path)?;
        if !options.suppress_subtitles {
            log::debug!("Subtitle rendering is not available; only video is decoded");
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Worker {
            path: path.to_path_buf(),
            duration_millis,
            surface: options.surface.clone(),
            volume: self.volume.clone(),
            notifier,
            commands: rx,
        };
        thread::Builder::new()
            .name("klydio-decoder".into())
            .spawn(move || worker.run())
            .map_err(|e| EngineError::PlaybackFailed(format!("Cannot start decoder: {e}")))?;

        self.commands = Some(tx);
        self.surface = options.surface.clone();
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.send(WorkerCommand::TogglePause);
    }

    fn seek_to(&mut self, target_millis: u64) {
        self.send(WorkerCommand::Seek(target_millis));
    }

    fn set_volume(&mut self, volume: VolumePercent) {
        self.volume.set(volume);
    }

    fn stop(&mut self) {
        if let Some(tx) = self.commands.take() {
            // The worker exits on Stop or when the sender is dropped.
            let _ = tx.send(WorkerCommand::Stop);
        }
        if let Some(surface) = self.surface.take() {
            surface.clear();
        }
    }
}

/// Opens the container and checks it has a video stream.
///
/// Returns the container duration in milliseconds, 0 if unknown. The worker
/// opens the file again on its own thread; FFmpeg contexts stay there.
fn probe(path: &Path) -> Result<u64, EngineError> {
    if !path.exists() {
        return Err(EngineError::NotFound(path.to_path_buf()));
    }
    let ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| EngineError::from_message(&e.to_string(), path))?;
    if ictx.streams().best(ffmpeg_next::media::Type::Video).is_none() {
        return Err(EngineError::UnsupportedFormat("No video stream found".into()));
    }
    Ok(container_duration_millis(ictx.duration()))
}

fn container_duration_millis(duration: i64) -> u64 {
    // AV_NOPTS_VALUE and other negatives mean "unknown".
    u64::try_from(duration).map_or(0, |micros| micros / 1_000)
}

/// Decoder thread state. Everything FFmpeg lives on this thread.
struct Worker {
    path: PathBuf,
    duration_millis: u64,
    surface: Option<FrameSink>,
    volume: SharedVolume,
    notifier: Notifier,
    commands: mpsc::UnboundedReceiver<WorkerCommand>,
}

/// Wall-clock anchor used to pace frames.
#[derive(Debug, Default)]
struct Pacing {
    started: Option<(Instant, f64)>,
}

impl Pacing {
    fn reset(&mut self) {
        self.started = None;
    }

    /// Sleeps until the frame at `pts_secs` is due.
    fn wait_for(&mut self, pts_secs: f64) {
        let (start, first_pts) = *self.started.get_or_insert((Instant::now(), pts_secs));
        let offset = (pts_secs - first_pts).max(0.0);
        let due = start + Duration::from_secs_f64(offset);
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
    }
}

/// How a decoded frame relates to a pending seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    /// Before the target: decode it, never show or play it.
    Skip,
    /// First frame at or past the target.
    Landed,
    /// No seek pending.
    Regular,
}

/// Discards frames between the keyframe a container seek lands on and the
/// requested target.
#[derive(Debug, Default)]
struct SeekSkip {
    target: Option<u64>,
    skipped: u32,
}

impl SeekSkip {
    fn arm(&mut self, target_millis: u64) {
        self.target = Some(target_millis);
        self.skipped = 0;
    }

    fn disarm(&mut self) {
        self.target = None;
    }

    /// Classifies a frame whose content runs up to `reach_millis`.
    fn classify(&mut self, reach_millis: u64) -> Landing {
        let Some(target) = self.target else {
            return Landing::Regular;
        };
        if reach_millis < target {
            if self.skipped < MAX_SEEK_FRAMES {
                self.skipped += 1;
                return Landing::Skip;
            }
            log::debug!("Gave up skipping towards {target} ms after {MAX_SEEK_FRAMES} frames");
        }
        self.target = None;
        Landing::Landed
    }
}

/// Packet-in, frame-out decoding.
trait Decode {
    type Frame;

    /// Takes a frame the decoder already has, if any.
    fn receive(&mut self) -> Option<Self::Frame>;

    /// Reads the next packet and hands it to its decoder. `false` once the
    /// input is exhausted.
    fn feed(&mut self) -> bool;

    /// Signals end of stream so buffered frames come out.
    fn finish(&mut self);
}

/// Returns the next frame, or `None` once input and decoder are both empty.
///
/// `draining` is set when the input runs out and must be cleared when the
/// decoder is flushed for a seek.
fn pull_frame<D: Decode>(decoder: &mut D, draining: &mut bool) -> Option<D::Frame> {
    loop {
        if let Some(frame) = decoder.receive() {
            return Some(frame);
        }
        if *draining {
            return None;
        }
        if !decoder.feed() {
            *draining = true;
            decoder.finish();
        }
    }
}

/// Best audio stream, resampled for the output device.
struct AudioTrack {
    stream_index: usize,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    time_base: f64,
    output: AudioOutput,
    seek_skip: SeekSkip,
}

impl AudioTrack {
    /// `None` plays the file without sound.
    fn open(input: &ffmpeg_next::format::context::Input, volume: &SharedVolume) -> Option<Self> {
        let stream = input.streams().best(ffmpeg_next::media::Type::Audio)?;
        let stream_index = stream.index();
        let time_base = f64::from(stream.time_base().numerator())
            / f64::from(stream.time_base().denominator());

        let decoder = match ffmpeg_next::codec::context::Context::from_parameters(
            stream.parameters(),
        )
        .and_then(|context| context.decoder().audio())
        {
            Ok(decoder) => decoder,
            Err(e) => {
                log::warn!("Audio stream {stream_index} cannot be decoded: {e}");
                return None;
            }
        };

        let output = match AudioOutput::new(volume.clone()) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Playing without sound: {e}");
                return None;
            }
        };

        let layout = match output.source_channels() {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let resampler = match ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            layout,
            output.sample_rate(),
        ) {
            Ok(resampler) => resampler,
            Err(e) => {
                log::warn!("Audio resampler unavailable, playing without sound: {e}");
                return None;
            }
        };

        Some(Self {
            stream_index,
            decoder,
            resampler,
            time_base,
            output,
            seek_skip: SeekSkip::default(),
        })
    }

    fn feed(&mut self, packet: &ffmpeg_next::Packet) {
        if let Err(e) = self.decoder.send_packet(packet) {
            log::debug!("Dropping undecodable audio packet: {e}");
            return;
        }
        self.play_decoded();
    }

    fn finish(&mut self) {
        if self.decoder.send_eof().is_ok() {
            self.play_decoded();
        }
    }

    fn restart_at(&mut self, target_millis: u64) {
        self.decoder.flush();
        self.output.clear();
        self.seek_skip.arm(target_millis);
    }

    fn play_decoded(&mut self) {
        let mut decoded = ffmpeg_next::frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let start = decoded
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * self.time_base);
            let length = decoded.samples() as f64 / f64::from(self.decoder.rate().max(1));
            let end_millis = ((start + length).max(0.0) * 1_000.0) as u64;
            if self.seek_skip.classify(end_millis) == Landing::Skip {
                continue;
            }

            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = self.resampler.run(&decoded, &mut resampled) {
                log::debug!("Resampling failed: {e}");
                continue;
            }
            self.output
                .queue(&extract_samples(&resampled, self.output.source_channels()));
        }
    }
}

/// Reads interleaved `f32` samples out of a packed audio frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let count = frame.samples() * usize::from(channels);
    frame
        .data(0)
        .chunks_exact(4)
        .take(count)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

struct Pipeline {
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    time_base: f64,
    audio: Option<AudioTrack>,
    draining: bool,
}

impl Pipeline {
    fn open(path: &Path, volume: &SharedVolume) -> Result<Self, EngineError> {
        let input = ffmpeg_next::format::input(&path)
            .map_err(|e| EngineError::from_message(&e.to_string(), path))?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| EngineError::UnsupportedFormat("No video stream found".into()))?;
        let stream_index = stream.index();
        let time_base = f64::from(stream.time_base().numerator())
            / f64::from(stream.time_base().denominator());

        let context = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| EngineError::UnsupportedFormat(format!("Codec context: {e}")))?;
        let decoder = context
            .decoder()
            .video()
            .map_err(|e| EngineError::UnsupportedFormat(format!("Video decoder: {e}")))?;
        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            ffmpeg_next::format::Pixel::RGBA,
            decoder.width(),
            decoder.height(),
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| EngineError::PlaybackFailed(format!("Scaler: {e}")))?;

        let audio = AudioTrack::open(&input, volume);
        if audio.is_none() {
            log::debug!("No audio will be played for {}", path.display());
        }

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            time_base,
            audio,
            draining: false,
        })
    }

    fn seek(&mut self, target_millis: u64) -> Result<(), EngineError> {
        let timestamp = i64::try_from(target_millis)
            .unwrap_or(i64::MAX / AV_TIME_BASE)
            .saturating_mul(AV_TIME_BASE / 1_000);
        self.input
            .seek(timestamp, ..timestamp)
            .map_err(|e| EngineError::PlaybackFailed(format!("Seek failed: {e}")))?;
        self.decoder.flush();
        self.draining = false;
        if let Some(audio) = self.audio.as_mut() {
            audio.restart_at(target_millis);
        }
        Ok(())
    }

    fn set_audio_paused(&self, paused: bool) {
        if let Some(audio) = &self.audio {
            audio.output.set_paused(paused);
        }
    }

    /// Decodes the next video frame, or `None` at end of stream. Audio
    /// packets met on the way are played.
    fn next_frame(&mut self) -> Option<ffmpeg_next::frame::Video> {
        let mut draining = self.draining;
        let frame = pull_frame(self, &mut draining);
        self.draining = draining;
        frame
    }

    fn pts_millis(&self, frame: &ffmpeg_next::frame::Video) -> u64 {
        let pts_secs = frame
            .timestamp()
            .map_or(0.0, |pts| pts as f64 * self.time_base);
        (pts_secs.max(0.0) * 1_000.0) as u64
    }

    fn to_rgba(
        &mut self,
        frame: &ffmpeg_next::frame::Video,
        pts_millis: u64,
    ) -> Result<VideoFrame, EngineError> {
        let mut rgba = ffmpeg_next::frame::Video::empty();
        self.scaler
            .run(frame, &mut rgba)
            .map_err(|e| EngineError::PlaybackFailed(format!("Scaling failed: {e}")))?;

        Ok(VideoFrame {
            rgba: Arc::new(extract_rgba(&rgba)),
            width: rgba.width(),
            height: rgba.height(),
            pts_millis,
        })
    }
}

impl Decode for Pipeline {
    type Frame = ffmpeg_next::frame::Video;

    fn receive(&mut self) -> Option<Self::Frame> {
        let mut frame = ffmpeg_next::frame::Video::empty();
        self.decoder.receive_frame(&mut frame).ok().map(|()| frame)
    }

    fn feed(&mut self) -> bool {
        let Some((stream, packet)) = self.input.packets().next() else {
            return false;
        };
        let index = stream.index();
        if index == self.stream_index {
            if let Err(e) = self.decoder.send_packet(&packet) {
                log::debug!("Dropping undecodable packet: {e}");
            }
        } else if let Some(audio) = self.audio.as_mut().filter(|a| a.stream_index == index) {
            audio.feed(&packet);
        }
        true
    }

    fn finish(&mut self) {
        if let Err(e) = self.decoder.send_eof() {
            log::debug!("Video decoder refused end of stream: {e}");
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.finish();
        }
    }
}

/// Copies RGBA rows out of a frame, dropping the stride padding.
fn extract_rgba(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let stride = frame.stride(0);
    let data = frame.data(0);

    let row_len = width * 4;
    let mut bytes = Vec::with_capacity(row_len * height);
    for y in 0..height {
        let start = y * stride;
        bytes.extend_from_slice(&data[start..start + row_len]);
    }
    bytes
}

impl Worker {
    fn run(mut self) {
        let mut pipeline = match Pipeline::open(&self.path, &self.volume) {
            Ok(pipeline) => pipeline,
            Err(err) => {
                log::warn!("Decoder failed to open {}: {}", self.path.display(), err);
                self.notifier.notify(EngineEvent::PlaybackFailed(err.to_string()));
                return;
            }
        };

        self.notifier.notify(EngineEvent::FileLoaded);
        self.notifier
            .notify(EngineEvent::DurationChanged(self.duration_millis));
        self.notifier.notify(EngineEvent::PauseChanged(false));

        let mut playing = true;
        let mut at_end = false;
        let mut show_one = false;
        let mut position = 0u64;
        let mut last_report: Option<Instant> = None;
        let mut pacing = Pacing::default();
        let mut seek_skip = SeekSkip::default();

        loop {
            loop {
                let command = match self.commands.try_recv() {
                    Ok(command) => command,
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => return,
                };
                match command {
                    WorkerCommand::Stop => return,
                    WorkerCommand::TogglePause if at_end => {
                        if let Err(err) = pipeline.seek(0) {
                            self.fail(&err);
                            return;
                        }
                        at_end = false;
                        playing = true;
                        position = 0;
                        pacing.reset();
                        seek_skip.disarm();
                        pipeline.set_audio_paused(false);
                        self.notifier.notify(EngineEvent::PositionChanged(0));
                        self.notifier.notify(EngineEvent::PauseChanged(false));
                    }
                    WorkerCommand::TogglePause => {
                        playing = !playing;
                        pacing.reset();
                        pipeline.set_audio_paused(!playing);
                        self.notifier.notify(EngineEvent::PauseChanged(!playing));
                    }
                    WorkerCommand::Seek(target) => {
                        if let Err(err) = pipeline.seek(target) {
                            log::warn!("{err}");
                            continue;
                        }
                        // The landed frame reports the position.
                        at_end = false;
                        position = target;
                        pacing.reset();
                        seek_skip.arm(target);
                        show_one = !playing;
                    }
                }
            }

            if !playing && !show_one {
                thread::sleep(IDLE_POLL);
                continue;
            }

            let Some(decoded) = pipeline.next_frame() else {
                if !at_end {
                    at_end = true;
                    playing = false;
                    show_one = false;
                    pacing.reset();
                    seek_skip.disarm();
                    let end = self.duration_millis.max(position);
                    self.notifier.notify(EngineEvent::PositionChanged(end));
                    self.notifier.notify(EngineEvent::PauseChanged(true));
                    log::debug!("End of stream reached for {}", self.path.display());
                }
                continue;
            };

            let pts_millis = pipeline.pts_millis(&decoded);
            match seek_skip.classify(pts_millis) {
                Landing::Skip => continue,
                Landing::Landed => last_report = None,
                Landing::Regular => {}
            }

            let frame = match pipeline.to_rgba(&decoded, pts_millis) {
                Ok(frame) => frame,
                Err(err) => {
                    self.fail(&err);
                    return;
                }
            };

            if playing {
                pacing.wait_for(frame.pts_millis as f64 / 1_000.0);
            }
            show_one = false;
            position = frame.pts_millis;
            if let Some(surface) = &self.surface {
                surface.present(frame);
            }

            let due = last_report.map_or(true, |t| t.elapsed() >= POSITION_REPORT_INTERVAL);
            if due {
                last_report = Some(Instant::now());
                if !self.notifier.notify(EngineEvent::PositionChanged(position)) {
                    return;
                }
            }
        }
    }

    fn fail(&self, err: &EngineError) {
        log::warn!("Playback of {} failed: {}", self.path.display(), err);
        self.notifier.notify(EngineEvent::PlaybackFailed(err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::notifier::NotificationQueue;

    #[test]
    fn unknown_container_duration_maps_to_zero() {
        assert_eq!(container_duration_millis(i64::MIN), 0);
        assert_eq!(container_duration_millis(-1), 0);
        assert_eq!(container_duration_millis(2_500_000), 2_500);
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let mut backend = FfmpegBackend::new();
        let mut queue = NotificationQueue::new();
        let result = backend.open(
            Path::new("/nonexistent/video.mp4"),
            &LoadOptions::default(),
            queue.begin_session(),
        );
        assert_eq!(
            result,
            Err(EngineError::NotFound(PathBuf::from("/nonexistent/video.mp4")))
        );
    }

    #[test]
    fn open_rejects_non_media_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.mp4");
        std::fs::write(&path, b"definitely not a video").expect("write");

        let mut backend = FfmpegBackend::new();
        let mut queue = NotificationQueue::new();
        let result = backend.open(&path, &LoadOptions::default(), queue.begin_session());
        assert!(result.is_err());
    }

    #[test]
    fn transport_calls_without_session_are_harmless() {
        let mut backend = FfmpegBackend::new();
        backend.toggle_pause();
        backend.seek_to(1_000);
        backend.set_volume(VolumePercent::new(30));
        backend.stop();
        assert_eq!(backend.volume().value(), 30);
    }

    #[test]
    fn stop_clears_the_surface() {
        let sink = FrameSink::new();
        sink.present(VideoFrame {
            rgba: Arc::new(vec![0; 4]),
            width: 1,
            height: 1,
            pts_millis: 0,
        });
        let mut backend = FfmpegBackend {
            surface: Some(sink.clone()),
            ..FfmpegBackend::default()
        };
        backend.stop();
        assert!(sink.latest().is_none());
    }

    #[test]
    fn pacing_does_not_wait_for_past_frames() {
        let mut pacing = Pacing::default();
        let start = Instant::now();
        pacing.wait_for(10.0);
        pacing.wait_for(9.0);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn seek_skip_drops_frames_before_the_target() {
        let mut skip = SeekSkip::default();
        assert_eq!(skip.classify(0), Landing::Regular);

        skip.arm(5_000);
        assert_eq!(skip.classify(4_000), Landing::Skip);
        assert_eq!(skip.classify(4_960), Landing::Skip);
        assert_eq!(skip.classify(5_000), Landing::Landed);
        assert_eq!(skip.classify(5_040), Landing::Regular);
    }

    #[test]
    fn seek_skip_gives_up_after_too_many_frames() {
        let mut skip = SeekSkip::default();
        skip.arm(u64::MAX);
        for _ in 0..MAX_SEEK_FRAMES {
            assert_eq!(skip.classify(0), Landing::Skip);
        }
        assert_eq!(skip.classify(0), Landing::Landed);
    }

    #[test]
    fn rearming_restarts_the_budget() {
        let mut skip = SeekSkip::default();
        skip.arm(u64::MAX);
        for _ in 0..MAX_SEEK_FRAMES - 1 {
            skip.classify(0);
        }
        skip.arm(1_000);
        assert_eq!(skip.classify(500), Landing::Skip);
        skip.disarm();
        assert_eq!(skip.classify(500), Landing::Regular);
    }

    /// Decoder that holds back `delay` frames until end of stream.
    struct Delayed {
        packets: std::collections::VecDeque<u32>,
        held: std::collections::VecDeque<u32>,
        ready: std::collections::VecDeque<u32>,
        delay: usize,
        finished: bool,
        feeds_after_finish: u32,
    }

    impl Delayed {
        fn new(count: u32, delay: usize) -> Self {
            Self {
                packets: (0..count).collect(),
                held: std::collections::VecDeque::new(),
                ready: std::collections::VecDeque::new(),
                delay,
                finished: false,
                feeds_after_finish: 0,
            }
        }
    }

    impl Decode for Delayed {
        type Frame = u32;

        fn receive(&mut self) -> Option<u32> {
            self.ready.pop_front()
        }

        fn feed(&mut self) -> bool {
            if self.finished {
                self.feeds_after_finish += 1;
            }
            let Some(packet) = self.packets.pop_front() else {
                return false;
            };
            self.held.push_back(packet);
            if self.held.len() > self.delay {
                self.ready.extend(self.held.pop_front());
            }
            true
        }

        fn finish(&mut self) {
            self.finished = true;
            self.ready.extend(self.held.drain(..));
        }
    }

    #[test]
    fn buffered_frames_come_out_at_end_of_stream() {
        let mut decoder = Delayed::new(6, 3);
        let mut draining = false;

        let mut frames = Vec::new();
        while let Some(frame) = pull_frame(&mut decoder, &mut draining) {
            frames.push(frame);
        }

        assert_eq!(frames, vec![0, 1, 2, 3, 4, 5]);
        assert!(draining);
        assert!(pull_frame(&mut decoder, &mut draining).is_none());
        assert_eq!(decoder.feeds_after_finish, 0);
    }

    #[test]
    fn clearing_the_drain_flag_resumes_reading() {
        let mut decoder = Delayed::new(0, 0);
        let mut draining = false;
        assert!(pull_frame(&mut decoder, &mut draining).is_none());

        // A seek flushes the decoder and rewinds the input.
        decoder.packets.extend([10, 11]);
        decoder.finished = false;
        draining = false;

        assert_eq!(pull_frame(&mut decoder, &mut draining), Some(10));
        assert_eq!(pull_frame(&mut decoder, &mut draining), Some(11));
        assert!(pull_frame(&mut decoder, &mut draining).is_none());
    }
}
