//! Halo - floating desktop overlay with live audio-reactive widgets.
//!
//! The window chrome, pointer feed and compositing backend are supplied by
//! a host; this binary wires the core scene graph to the audio capture
//! boundary and drives it at a fixed cadence. Draw calls go to a tracing
//! surface so the pipeline is observable without a compositor attached.

#![warn(missing_docs)]

mod logging_setup;

use anyhow::{Context, Result};
use glam::Vec2;
use halo_core::{
    Align, Color, DrawSurface, Node, OverlaySettings, PointerState, Rect, Scene, VisualizerWidget,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};
#[cfg(feature = "audio")]
use tracing::warn;

/// Surface that traces draw calls; stands in for the host compositor.
struct TraceSurface;

impl DrawSurface for TraceSurface {
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, blur: f32) {
        tracing::trace!(
            x = rect.min.x,
            y = rect.min.y,
            w = rect.width(),
            h = rect.height(),
            radius,
            alpha = color.a,
            blur,
            "rect"
        );
    }

    fn fill_gradient_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        top: Color,
        _bottom: Color,
        blur: f32,
    ) {
        tracing::trace!(
            x = rect.min.x,
            y = rect.min.y,
            w = rect.width(),
            h = rect.height(),
            radius,
            alpha = top.a,
            blur,
            "gradient"
        );
    }
}

fn load_settings() -> OverlaySettings {
    let Some(path) = std::env::args().nth(1) else {
        return OverlaySettings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: invalid settings file {path}: {e}; using defaults");
                OverlaySettings::default()
            }
        },
        Err(e) => {
            eprintln!("Warning: could not read settings file {path}: {e}; using defaults");
            OverlaySettings::default()
        }
    }
}

fn main() -> Result<()> {
    let settings = load_settings();
    let _log_guard =
        logging_setup::init(&settings.log).context("Failed to initialize logging")?;
    info!("halo starting");

    let mut scene = Scene::new(Vec2::new(1920.0, 1080.0));

    let panel = Node::new(Vec2::ZERO, Vec2::new(420.0, 160.0), Align::BottomCenter)
        .with_offset(Vec2::new(0.0, -48.0))
        .with_anchor(Vec2::new(0.5, 1.0))
        .with_color(Color::rgba(0.08, 0.08, 0.10, 0.85))
        .with_corner_radius(12.0);
    let panel_id = scene.add_root(panel);

    #[cfg_attr(not(feature = "audio"), allow(unused_mut))]
    let mut visualizer =
        VisualizerWidget::new(settings.theme.clone(), settings.spectrum.clone());
    #[cfg(feature = "audio")]
    match visualizer.attach_capture() {
        Ok(true) => info!("capture attached"),
        Ok(false) => info!("no capture device; running idle"),
        Err(e) => warn!("audio capture unavailable: {e}"),
    }

    let bars = Node::new(Vec2::ZERO, Vec2::new(380.0, 120.0), Align::Center)
        .with_anchor(Vec2::new(0.5, 0.5))
        .with_widget(Box::new(visualizer));
    scene
        .add_child(panel_id, bars)
        .context("Failed to attach visualizer node")?;

    let mut surface = TraceSurface;
    let tick = Duration::from_millis(16);
    let mut last = Instant::now();
    info!("frame loop running");

    loop {
        std::thread::sleep(tick);
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;

        // the host would supply real pointer state here
        let events = scene.update(dt, PointerState::default());
        for event in events {
            debug!(?event, "node event");
        }
        scene.draw(&mut surface);
    }
}
