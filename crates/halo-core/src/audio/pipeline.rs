//! Producer-side spectral pipeline.
//!
//! Chunks of float PCM arrive on the capture thread at whatever cadence
//! the device dictates; each chunk is windowed, transformed, and its
//! magnitudes written into the shared buffer under the single critical
//! section the consumer also uses. There is no queue: a write fully
//! replaces the previous spectrum, so a slow consumer simply skips
//! intermediate spectra (last-write-wins, bounded memory).

use crate::audio::fft;
use num_complex::Complex32;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Fixed transform length (power of two)
pub const FFT_SIZE: usize = 2048;

/// Shared spectral state between the audio producer thread and the
/// frame-driver consumer.
///
/// Producers should hold a `Weak` reference (see
/// [`crate::audio::capture`]): once the owning widget is torn down, late
/// callbacks fail to upgrade and no further writes can be observed.
pub struct SpectrumPipeline {
    window: Vec<f32>,
    magnitudes: Mutex<Vec<f32>>,
    sample_rate: AtomicU32,
}

impl SpectrumPipeline {
    /// Create an idle pipeline (all magnitudes zero)
    pub fn new() -> Self {
        Self {
            window: fft::hann_window(FFT_SIZE),
            magnitudes: Mutex::new(vec![0.0; FFT_SIZE / 2]),
            sample_rate: AtomicU32::new(0),
        }
    }

    /// Number of magnitude bins exposed to consumers (Nyquist-limited)
    pub const fn bin_count() -> usize {
        FFT_SIZE / 2
    }

    /// Sample rate of the most recent delivery, 0 before any data
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Relaxed)
    }

    /// Ingest one chunk of mono float samples (producer side).
    ///
    /// Up to [`FFT_SIZE`] samples are windowed; shorter chunks are only
    /// partially windowed, the remainder of the transform buffer stays
    /// zero. Non-finite samples are treated as silence.
    pub fn push(&self, sample_rate: u32, samples: &[f32]) {
        if samples.is_empty() || sample_rate == 0 {
            return;
        }
        self.sample_rate.store(sample_rate, Ordering::Relaxed);

        let mut buf = vec![Complex32::new(0.0, 0.0); FFT_SIZE];
        let n = samples.len().min(FFT_SIZE);
        for i in 0..n {
            let s = if samples[i].is_finite() { samples[i] } else { 0.0 };
            buf[i] = Complex32::new(s * self.window[i], 0.0);
        }
        fft::forward_in_place(&mut buf);

        let norm = 1.0 / (FFT_SIZE as f32).sqrt();
        let mut mags = self.magnitudes.lock();
        for (slot, c) in mags.iter_mut().zip(buf.iter()) {
            *slot = c.norm() * norm;
        }
        trace!(chunk = samples.len(), sample_rate, "spectrum updated");
    }

    /// Copy a consistent snapshot of the magnitude buffer into `out`
    /// (consumer side, once per tick).
    pub fn snapshot_into(&self, out: &mut Vec<f32>) {
        let mags = self.magnitudes.lock();
        out.clear();
        out.extend_from_slice(&mags);
    }
}

impl Default for SpectrumPipeline {
    fn default() -> Self {
        Self::new()
    }
}
