//! Device capture boundary (cpal).
//!
//! Thin wrapper around the default input device: the stream callback
//! downmixes to mono and pushes into a [`SpectrumPipeline`] through a
//! `Weak` handle, so a torn-down pipeline silently stops receiving data.
//! A missing device is not an error; the pipeline just idles.

use crate::audio::pipeline::SpectrumPipeline;
use crate::CoreError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use std::sync::{Arc, Weak};
use tracing::{error, info, warn};

/// Live capture stream feeding a spectrum pipeline.
///
/// Dropping the stream stops capture; this must happen before the owning
/// widget releases its pipeline handle.
pub struct CaptureStream {
    _stream: Stream,
    sample_rate: u32,
}

impl CaptureStream {
    /// Open the default input device and start capturing into `pipeline`.
    ///
    /// Returns `Ok(None)` when no usable device exists.
    pub fn open(pipeline: &Arc<SpectrumPipeline>) -> Result<Option<Self>, CoreError> {
        let host = cpal::default_host();
        let Some(device) = host.default_input_device() else {
            warn!("no capture device available; visualizer stays idle");
            return Ok(None);
        };

        let supported = device
            .default_input_config()
            .map_err(|e| CoreError::AudioBackend(e.to_string()))?;
        let sample_rate = supported.sample_rate().0;
        let config: StreamConfig = supported.config();
        let channels = config.channels as usize;
        let sink = Arc::downgrade(pipeline);

        let stream = match supported.sample_format() {
            SampleFormat::F32 => device
                .build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let mono = downmix_f32(data, channels);
                        deliver(&sink, sample_rate, &mono);
                    },
                    |err| error!("capture stream error: {err}"),
                    None,
                )
                .map_err(|e| CoreError::AudioBackend(e.to_string()))?,
            SampleFormat::I16 => device
                .build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let mono = downmix_i16(data, channels);
                        deliver(&sink, sample_rate, &mono);
                    },
                    |err| error!("capture stream error: {err}"),
                    None,
                )
                .map_err(|e| CoreError::AudioBackend(e.to_string()))?,
            SampleFormat::U16 => device
                .build_input_stream(
                    &config,
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        let mono = downmix_u16(data, channels);
                        deliver(&sink, sample_rate, &mono);
                    },
                    |err| error!("capture stream error: {err}"),
                    None,
                )
                .map_err(|e| CoreError::AudioBackend(e.to_string()))?,
            other => {
                return Err(CoreError::AudioBackend(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| CoreError::AudioBackend(e.to_string()))?;
        info!(sample_rate, channels, "capture stream started");

        Ok(Some(Self {
            _stream: stream,
            sample_rate,
        }))
    }

    /// Sample rate of the opened device
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn deliver(sink: &Weak<SpectrumPipeline>, sample_rate: u32, mono: &[f32]) {
    if let Some(pipeline) = sink.upgrade() {
        pipeline.push(sample_rate, mono);
    }
}

fn downmix_f32(data: &[f32], channels: usize) -> Vec<f32> {
    let mut mono = Vec::with_capacity(data.len() / channels.max(1));
    for frame in data.chunks_exact(channels.max(1)) {
        let sum: f32 = frame.iter().copied().sum();
        mono.push(sum / channels.max(1) as f32);
    }
    mono
}

fn downmix_i16(data: &[i16], channels: usize) -> Vec<f32> {
    let mut mono = Vec::with_capacity(data.len() / channels.max(1));
    for frame in data.chunks_exact(channels.max(1)) {
        let sum: i32 = frame.iter().map(|&s| s as i32).sum();
        mono.push((sum as f32 / channels.max(1) as f32) / i16::MAX as f32);
    }
    mono
}

fn downmix_u16(data: &[u16], channels: usize) -> Vec<f32> {
    let half = u16::MAX as f32 / 2.0;
    let mut mono = Vec::with_capacity(data.len() / channels.max(1));
    for frame in data.chunks_exact(channels.max(1)) {
        let sum: u32 = frame.iter().map(|&s| s as u32).sum();
        let avg = sum as f32 / channels.max(1) as f32;
        mono.push((avg - half) / half);
    }
    mono
}
