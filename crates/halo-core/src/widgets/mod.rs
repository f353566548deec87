//! Built-in widgets.

pub mod visualizer;

pub use visualizer::VisualizerWidget;
