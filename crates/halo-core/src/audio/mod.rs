//! Real-time audio-to-visual pipeline.
//!
//! Data flow: capture boundary (producer thread) → [`SpectrumPipeline`]
//! shared magnitude buffer → [`BandAnalyzer`] (consumer, frame-driver
//! thread) → visualizer draw.

pub mod bands;
#[cfg(feature = "audio")]
pub mod capture;
pub mod fft;
pub mod pipeline;

pub use bands::{band_average, BandAnalyzer, Smoother, SpectrumConfig};
#[cfg(feature = "audio")]
pub use capture::CaptureStream;
pub use pipeline::{SpectrumPipeline, FFT_SIZE};
