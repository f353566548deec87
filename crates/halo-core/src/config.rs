//! Overlay configuration.
//!
//! All tunables are explicit values passed at construction; the core has
//! no module-level settings state.

use crate::audio::SpectrumConfig;
use crate::geometry::Color;
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};

/// Theme colors and effect switches, read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color,
    /// Secondary accent color
    pub secondary: Color,
    /// Whether widgets apply the blur filter when drawing
    pub blur_enabled: bool,
    /// Whether visualizer bars blend toward the secondary color; when
    /// false the primary color is always used
    pub blend_colors: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::rgba(0.36, 0.64, 1.0, 1.0),
            secondary: Color::rgba(0.84, 0.32, 0.92, 1.0),
            blur_enabled: true,
            blend_colors: true,
        }
    }
}

/// Top-level overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OverlaySettings {
    /// Theme colors and switches
    #[serde(default)]
    pub theme: Theme,
    /// Band analysis parameters
    #[serde(default)]
    pub spectrum: SpectrumConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}
