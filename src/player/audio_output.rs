// SPDX-License-Identifier: MPL-2.0
//! Audio output through the default cpal device.
//!
//! The decoder thread pushes interleaved `f32` samples into a bounded queue;
//! the device callback drains it, applying the current volume. The stream is
//! not `Send`, so an [`AudioOutput`] lives and dies on the decoder thread.

use super::volume::VolumePercent;
use crate::config::DEFAULT_VOLUME_PERCENT;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

/// Seconds of audio the queue holds before new samples are dropped.
const BUFFER_SECONDS: usize = 2;

/// Volume shared between the control thread and the device callback.
#[derive(Debug, Clone)]
pub struct SharedVolume(Arc<AtomicU8>);

impl SharedVolume {
    pub fn get(&self) -> VolumePercent {
        VolumePercent::new(i32::from(self.0.load(Ordering::Relaxed)))
    }

    pub fn set(&self, volume: VolumePercent) {
        self.0.store(volume.value(), Ordering::Relaxed);
    }
}

impl Default for SharedVolume {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(DEFAULT_VOLUME_PERCENT)))
    }
}

/// State touched by both the decoder thread and the device callback.
struct SharedState {
    buffer: Mutex<VecDeque<f32>>,
    paused: AtomicBool,
    volume: SharedVolume,
}

/// An open output stream on the default device.
pub struct AudioOutput {
    shared: Arc<SharedState>,
    sample_rate: u32,
    source_channels: u16,
    capacity: usize,
    _stream: cpal::Stream,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("sample_rate", &self.sample_rate)
            .field("source_channels", &self.source_channels)
            .finish_non_exhaustive()
    }
}

impl AudioOutput {
    /// Opens the default output device and starts its stream.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no output device, its configuration
    /// cannot be read, or the stream fails to start.
    pub fn new(volume: SharedVolume) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let device_channels = supported_config.channels();
        let source_channels = source_channels(device_channels);
        let capacity = sample_rate as usize * usize::from(source_channels) * BUFFER_SECONDS;

        let shared = Arc::new(SharedState {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            paused: AtomicBool::new(false),
            volume,
        });

        let layout = Layout {
            source: usize::from(source_channels),
            device: usize::from(device_channels),
        };
        let config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&shared), layout)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, Arc::clone(&shared), layout)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, Arc::clone(&shared), layout)?
            }
            other => {
                return Err(Error::Io(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };
        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        log::debug!(
            "Audio output open: {sample_rate} Hz, {device_channels} device channel(s)"
        );
        Ok(Self {
            shared,
            sample_rate,
            source_channels,
            capacity,
            _stream: stream,
        })
    }

    /// Rate decoded audio must be resampled to.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count decoded audio must be resampled to: 1 for a mono
    /// device, 2 otherwise.
    pub fn source_channels(&self) -> u16 {
        self.source_channels
    }

    /// Queues interleaved samples for playback.
    pub fn queue(&self, samples: &[f32]) {
        let Ok(mut buffer) = self.shared.buffer.lock() else {
            return;
        };
        let dropped = push_bounded(&mut buffer, samples, self.capacity);
        if dropped > 0 {
            log::trace!("Audio queue full, dropped {dropped} samples");
        }
    }

    /// Silences the device without discarding queued samples.
    pub fn set_paused(&self, paused: bool) {
        self.shared.paused.store(paused, Ordering::Relaxed);
    }

    /// Discards every queued sample.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.shared.buffer.lock() {
            buffer.clear();
        }
    }
}

/// Decoded channel count for a device with `device_channels` outputs.
fn source_channels(device_channels: u16) -> u16 {
    if device_channels == 1 {
        1
    } else {
        2
    }
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    source: usize,
    device: usize,
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<SharedState>,
    layout: Layout,
) -> Result<cpal::Stream> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if shared.paused.load(Ordering::Relaxed) {
                    data.fill(T::from_sample(0.0f32));
                    return;
                }
                let Ok(mut buffer) = shared.buffer.lock() else {
                    data.fill(T::from_sample(0.0f32));
                    return;
                };
                fill_output(data, &mut buffer, layout, shared.volume.get().gain());
            },
            |err| log::warn!("Audio output error: {err}"),
            None,
        )
        .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
}

/// Appends as many samples as fit under `capacity`. Returns how many were
/// dropped.
fn push_bounded(buffer: &mut VecDeque<f32>, samples: &[f32], capacity: usize) -> usize {
    let room = capacity.saturating_sub(buffer.len());
    let taken = samples.len().min(room);
    buffer.extend(&samples[..taken]);
    samples.len() - taken
}

/// Writes one device period from `buffer`, scaled by `gain`.
///
/// Mono sources are copied to every device channel; stereo sources fill the
/// first two and leave the rest silent. A partial source frame is never
/// split: once the queue runs dry the remainder of the period is silence.
fn fill_output<T: cpal::Sample + cpal::FromSample<f32>>(
    data: &mut [T],
    buffer: &mut VecDeque<f32>,
    layout: Layout,
    gain: f32,
) {
    for frame in data.chunks_mut(layout.device.max(1)) {
        if buffer.len() < layout.source {
            frame.fill(T::from_sample(0.0f32));
            continue;
        }
        let mut source = [0.0f32; 2];
        for slot in source.iter_mut().take(layout.source) {
            *slot = buffer.pop_front().unwrap_or(0.0);
        }
        for (channel, out) in frame.iter_mut().enumerate() {
            let value = match layout.source {
                1 => source[0],
                _ if channel < layout.source => source[channel],
                _ => 0.0,
            };
            // Just under 1.0 so i16 conversion cannot overflow.
            *out = T::from_sample((value * gain).clamp(-1.0, 0.999_999_9));
        }
    }
}
