//! Band aggregation, auto-gain normalization, and temporal smoothing.
//!
//! Consumer side of the spectral pipeline, invoked once per update tick
//! on the frame-driver thread with a snapshot of the magnitude buffer.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of the band aggregation and smoothing stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectrumConfig {
    /// Number of frequency bands
    pub bar_count: usize,
    /// Lower edge of the analyzed window in Hz
    pub min_freq: f32,
    /// Upper edge of the analyzed window in Hz
    pub max_freq: f32,
    /// Absolute floor below which a band average is snapped to zero;
    /// also the lower clamp of the tracked maximum
    pub noise_floor: f32,
    /// Geometric per-tick decay of the tracked maximum
    pub max_decay: f32,
    /// Fraction of the tracked maximum above which the maximum snaps to
    /// the incoming value (fast attack)
    pub attack_ratio: f32,
    /// Smoothing rate while a band rises, in 1/s
    pub rise_rate: f32,
    /// Smoothing rate while a band falls, in 1/s
    pub fall_rate: f32,
    /// Per-band-index scale added to both smoothing rates
    pub band_rate_step: f32,
    /// Linear decrease of the gain-compensation coefficient per band index
    pub gain_slope: f32,
    /// Per-band bias applied after normalization (resized to `bar_count`,
    /// missing entries treated as 1.0)
    pub bias: Vec<f32>,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            bar_count: 6,
            min_freq: 20.0,
            max_freq: 5000.0,
            noise_floor: 0.001,
            max_decay: 0.90,
            attack_ratio: 0.7,
            rise_rate: 12.0,
            fall_rate: 6.0,
            band_rate_step: 0.05,
            gain_slope: 0.08,
            bias: vec![1.0, 0.95, 0.9, 0.95, 1.0, 1.05],
        }
    }
}

impl SpectrumConfig {
    /// Logarithmically spaced band edge `i` in Hz, for `i = 0..=bar_count`
    pub fn band_edge(&self, i: usize) -> f32 {
        self.min_freq * (self.max_freq / self.min_freq).powf(i as f32 / self.bar_count as f32)
    }

    /// Gain-compensation coefficient for band `i`
    pub fn gain_compensation(&self, i: usize) -> f32 {
        (1.0 - self.gain_slope * i as f32).max(0.5)
    }

    /// Bias coefficient for band `i`
    pub fn bias_for(&self, i: usize) -> f32 {
        self.bias.get(i).copied().unwrap_or(1.0)
    }
}

/// Average magnitude over the inclusive bin range covering
/// `[lo_freq, hi_freq]`. An empty range yields zero.
pub fn band_average(magnitudes: &[f32], sample_rate: u32, lo_freq: f32, hi_freq: f32) -> f32 {
    if magnitudes.is_empty() || sample_rate == 0 {
        return 0.0;
    }
    let fft_size = magnitudes.len() * 2;
    let to_bin = |freq: f32| (freq / sample_rate as f32 * fft_size as f32) as usize;
    let lo = to_bin(lo_freq);
    let hi = to_bin(hi_freq).min(magnitudes.len() - 1);
    if lo > hi {
        return 0.0;
    }
    let count = (hi - lo + 1) as f32;
    magnitudes[lo..=hi].iter().sum::<f32>() / count
}

/// Per-band exponential smoother with separate rise and fall rates.
///
/// Per tick each value approaches its target by
/// `(target - value) * (1 - e^(-rate * dt))`; the rate is the rise rate
/// when the target is above the current value, the fall rate otherwise,
/// both scaled slightly upward per band index.
#[derive(Debug, Clone)]
pub struct Smoother {
    rise_rate: f32,
    fall_rate: f32,
    band_rate_step: f32,
    values: Vec<f32>,
}

impl Smoother {
    /// Create a smoother for `len` bands, all starting at zero
    pub fn new(len: usize, rise_rate: f32, fall_rate: f32, band_rate_step: f32) -> Self {
        Self {
            rise_rate,
            fall_rate,
            band_rate_step,
            values: vec![0.0; len],
        }
    }

    /// Current smoothed values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Advance every band toward its target by `dt` seconds
    pub fn advance(&mut self, targets: &[f32], dt: f32) {
        for (i, value) in self.values.iter_mut().enumerate() {
            let target = targets.get(i).copied().unwrap_or(0.0);
            let base = if target > *value {
                self.rise_rate
            } else {
                self.fall_rate
            };
            let rate = base * (1.0 + self.band_rate_step * i as f32);
            *value += (target - *value) * (1.0 - (-rate * dt).exp());
        }
    }
}

/// Turns raw magnitude snapshots into perceptually stable band heights.
pub struct BandAnalyzer {
    config: SpectrumConfig,
    tracked_max: Vec<f32>,
    targets: Vec<f32>,
    smoother: Smoother,
    amplitude: f32,
}

impl BandAnalyzer {
    /// Create an analyzer with the given parameters
    pub fn new(config: SpectrumConfig) -> Self {
        let bars = config.bar_count;
        let smoother = Smoother::new(
            bars,
            config.rise_rate,
            config.fall_rate,
            config.band_rate_step,
        );
        debug!(
            bars,
            min_freq = config.min_freq,
            max_freq = config.max_freq,
            "band analyzer created"
        );
        Self {
            tracked_max: vec![config.noise_floor; bars],
            targets: vec![0.0; bars],
            smoother,
            amplitude: 0.0,
            config,
        }
    }

    /// Analysis parameters
    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Gated and gain-compensated average of band `i`, before auto-gain
    pub fn raw_band_value(&self, magnitudes: &[f32], sample_rate: u32, i: usize) -> f32 {
        let avg = band_average(
            magnitudes,
            sample_rate,
            self.config.band_edge(i),
            self.config.band_edge(i + 1),
        );
        let gated = if avg < self.config.noise_floor { 0.0 } else { avg };
        gated * self.config.gain_compensation(i)
    }

    /// Run one analysis tick over a magnitude snapshot.
    ///
    /// `dt` is the elapsed time since the previous tick.
    pub fn process(&mut self, magnitudes: &[f32], sample_rate: u32, dt: f32) {
        for i in 0..self.config.bar_count {
            let value = self.raw_band_value(magnitudes, sample_rate, i);

            // fast attack, geometric decay, floored to avoid division blow-up
            if value > self.config.attack_ratio * self.tracked_max[i] {
                self.tracked_max[i] = value;
            } else {
                self.tracked_max[i] *= self.config.max_decay;
            }
            self.tracked_max[i] = self.tracked_max[i].max(self.config.noise_floor);

            let normalized = (value / self.tracked_max[i]).clamp(0.0, 1.0);
            self.targets[i] = (normalized * self.config.bias_for(i)).clamp(0.0, 1.0);
        }

        self.amplitude = if self.targets.is_empty() {
            0.0
        } else {
            self.targets.iter().sum::<f32>() / self.targets.len() as f32
        };

        self.smoother.advance(&self.targets, dt);
    }

    /// Post-bias normalized band targets of the last tick (pre-smoothing)
    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    /// Smoothed band heights in `[0, 1]`
    pub fn smoothed(&self) -> &[f32] {
        self.smoother.values()
    }

    /// Per-band tracked maxima (auto-gain reference)
    pub fn tracked_max(&self) -> &[f32] {
        &self.tracked_max
    }

    /// Arithmetic mean of the post-bias band targets
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}
