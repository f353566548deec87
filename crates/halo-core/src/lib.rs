//! Halo Core - scene graph and audio visualizer pipeline
//!
//! This crate contains the core of the Halo desktop overlay:
//! - Geometry primitives (Vec2, Rect, Color)
//! - Retained-mode scene graph with alignment-based layout, hover/press
//!   state and animated visibility
//! - Real-time spectral pipeline (Hann window + radix-2 FFT) feeding
//!   auto-gain-normalized, smoothed frequency bands
//! - The visualizer widget tying both together
//!
//! The windowing host, draw backend and settings persistence live outside
//! this crate; they interact through [`DrawSurface`], [`PointerState`]
//! and the config structs.

#![warn(missing_docs)]

pub use glam::Vec2;

pub mod audio;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod scene;
pub mod surface;
pub mod widgets;

// Audio pipeline
#[cfg(feature = "audio")]
pub use audio::CaptureStream;
pub use audio::{band_average, BandAnalyzer, Smoother, SpectrumConfig, SpectrumPipeline, FFT_SIZE};

// Configuration
pub use config::{OverlaySettings, Theme};
pub use logging::LogConfig;

// Geometry
pub use geometry::{Color, Rect};

// Scene graph
pub use scene::{
    resolve, Align, DrawContext, Node, NodeEvent, NodeId, PointerState, Scene, Widget,
    HOVER_MARGIN,
};
pub use surface::DrawSurface;

// Widgets
pub use widgets::VisualizerWidget;

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// Referenced node is not part of the scene
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Audio backend failure (device enumeration or stream setup)
    #[error("Audio backend error: {0}")]
    AudioBackend(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
