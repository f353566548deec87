//! Audio visualizer widget.
//!
//! A scene-node widget that owns the spectral pipeline and renders the
//! smoothed band heights as gradient bars. Drawing is a pure function of
//! the smoother's output; nothing is persisted from one draw to the next.

use crate::audio::{BandAnalyzer, SpectrumConfig, SpectrumPipeline};
use crate::config::Theme;
use crate::geometry::{Rect, Vec2};
use crate::scene::{DrawContext, Widget};
use crate::surface::DrawSurface;
use std::sync::Arc;
use tracing::{debug, trace};

#[cfg(feature = "audio")]
use crate::audio::CaptureStream;
#[cfg(feature = "audio")]
use crate::CoreError;

/// Gap between adjacent bars
const BAR_SPACING: f32 = 4.0;
/// Side length of the idle dot
const DOT_SIZE: f32 = 4.0;
/// Band height below which a bar degenerates to a dot
const DOT_THRESHOLD: f32 = 0.02;
/// Bar corner radius
const BAR_RADIUS: f32 = 2.0;

/// Frequency-band visualizer.
pub struct VisualizerWidget {
    // capture is declared (and torn down) before the pipeline handle so
    // the device callback can never outlive the buffer it writes to
    #[cfg(feature = "audio")]
    capture: Option<CaptureStream>,
    pipeline: Arc<SpectrumPipeline>,
    analyzer: BandAnalyzer,
    theme: Theme,
    snapshot: Vec<f32>,
    ticks: u64,
}

impl VisualizerWidget {
    /// Create a visualizer with no capture attached; samples can be pushed
    /// into [`VisualizerWidget::pipeline`] by any producer.
    pub fn new(theme: Theme, config: SpectrumConfig) -> Self {
        Self {
            #[cfg(feature = "audio")]
            capture: None,
            pipeline: Arc::new(SpectrumPipeline::new()),
            analyzer: BandAnalyzer::new(config),
            theme,
            snapshot: Vec::with_capacity(SpectrumPipeline::bin_count()),
            ticks: 0,
        }
    }

    /// Start capturing from the default input device.
    ///
    /// Returns whether a device was found; a missing device leaves the
    /// pipeline idle without error.
    #[cfg(feature = "audio")]
    pub fn attach_capture(&mut self) -> Result<bool, CoreError> {
        self.capture = CaptureStream::open(&self.pipeline)?;
        Ok(self.capture.is_some())
    }

    /// Shared handle to the spectral pipeline (producer side)
    pub fn pipeline(&self) -> Arc<SpectrumPipeline> {
        Arc::clone(&self.pipeline)
    }

    /// Smoothed band heights from the last update
    pub fn bands(&self) -> &[f32] {
        self.analyzer.smoothed()
    }

    /// Aggregate amplitude from the last update
    pub fn amplitude(&self) -> f32 {
        self.analyzer.amplitude()
    }

    fn bar_colors(&self, level: f32) -> (crate::geometry::Color, crate::geometry::Color) {
        let top = if self.theme.blend_colors {
            self.theme.primary.lerp(self.theme.secondary, level)
        } else {
            self.theme.primary
        };
        (top, self.theme.primary)
    }
}

impl Widget for VisualizerWidget {
    fn update(&mut self, dt: f32) {
        self.pipeline.snapshot_into(&mut self.snapshot);
        let sample_rate = self.pipeline.sample_rate();
        self.analyzer.process(&self.snapshot, sample_rate, dt);

        self.ticks += 1;
        if self.ticks % 300 == 0 {
            debug!(
                amplitude = self.analyzer.amplitude(),
                sample_rate, "visualizer level"
            );
        }
    }

    fn draw(&self, ctx: &DrawContext, surface: &mut dyn DrawSurface) {
        if ctx.alpha <= 0.0 {
            return;
        }
        let bands = self.analyzer.smoothed();
        if bands.is_empty() {
            return;
        }

        let n = bands.len();
        let bar_w = (ctx.rect.width() - BAR_SPACING * (n - 1) as f32) / n as f32;
        if bar_w <= 0.0 {
            return;
        }
        let blur = if self.theme.blur_enabled { ctx.blur } else { 0.0 };

        for (i, &level) in bands.iter().enumerate() {
            let x = ctx.rect.min.x + i as f32 * (bar_w + BAR_SPACING);

            if level < DOT_THRESHOLD {
                let dot = Rect::from_pos_size(
                    Vec2::new(
                        x + (bar_w - DOT_SIZE) * 0.5,
                        ctx.rect.max.y - DOT_SIZE,
                    ),
                    Vec2::splat(DOT_SIZE),
                );
                surface.fill_rounded_rect(
                    dot,
                    DOT_SIZE * 0.5,
                    self.theme.primary.faded(ctx.alpha),
                    blur,
                );
                continue;
            }

            let h = level * ctx.rect.height();
            let bar = Rect::from_pos_size(Vec2::new(x, ctx.rect.max.y - h), Vec2::new(bar_w, h));
            let (top, bottom) = self.bar_colors(level);
            surface.fill_gradient_rect(
                bar,
                BAR_RADIUS,
                top.faded(ctx.alpha),
                bottom.faded(ctx.alpha),
                blur,
            );
        }
    }

    fn teardown(&mut self) {
        // release the device subscription before anything else goes away
        #[cfg(feature = "audio")]
        {
            self.capture = None;
        }
        trace!("visualizer torn down");
    }
}
