use glam::Vec2;
use halo_core::scene::fade::FADE_DURATION;
use halo_core::{
    resolve, Align, Color, DrawContext, DrawSurface, Node, NodeEvent, PointerState, Rect, Scene,
    Widget,
};
use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

fn scene() -> Scene {
    Scene::new(SCREEN)
}

fn pointer_at(x: f32, y: f32, down: bool) -> PointerState {
    PointerState {
        position: Vec2::new(x, y),
        down,
    }
}

/// Records draw calls in order.
#[derive(Default)]
struct RecordingSurface {
    calls: Vec<(&'static str, Rect, f32)>,
}

impl DrawSurface for RecordingSurface {
    fn fill_rounded_rect(&mut self, rect: Rect, _radius: f32, color: Color, _blur: f32) {
        self.calls.push(("rect", rect, color.a));
    }

    fn fill_gradient_rect(
        &mut self,
        rect: Rect,
        _radius: f32,
        top: Color,
        _bottom: Color,
        _blur: f32,
    ) {
        self.calls.push(("gradient", rect, top.a));
    }
}

#[test]
fn test_alignment_categories_resolve_per_formula() {
    let size = Vec2::new(40.0, 24.0);
    let screen = Rect::from_pos_size(Vec2::ZERO, SCREEN);

    for &align in Align::all() {
        let mut scene = scene();
        let id = scene.add_root(Node::new(Vec2::ZERO, size, align));
        scene.update(0.016, PointerState::default());

        let expected = align.origin_in(screen);
        let node = scene.node(id).unwrap();
        assert_eq!(
            node.rect().min,
            expected,
            "alignment {align:?} resolved to the wrong origin"
        );
    }
}

#[test]
fn test_self_resolution_matches_query_resolution() {
    let mut scene = scene();
    let size = Vec2::new(64.0, 32.0);
    let offset = Vec2::new(13.0, -7.5);
    let anchor = Vec2::new(0.25, 0.75);

    let parent = scene.add_root(
        Node::new(Vec2::ZERO, Vec2::new(300.0, 200.0), Align::Center)
            .with_anchor(Vec2::new(0.5, 0.5)),
    );
    let child = scene
        .add_child(
            parent,
            Node::new(offset, size, Align::BottomRight).with_anchor(anchor),
        )
        .unwrap();
    scene.update(0.016, PointerState::default());

    let queried = scene.resolve_at(Some(parent), Align::BottomRight, offset, anchor, size);
    assert_eq!(scene.node(child).unwrap().rect().min, queried);

    let root_query = scene.resolve_at(None, Align::Center, Vec2::ZERO, Vec2::new(0.5, 0.5), size);
    let direct = resolve(
        scene.screen_rect(),
        Align::Center,
        Vec2::ZERO,
        Vec2::new(0.5, 0.5),
        size,
    );
    assert_eq!(root_query, direct);
}

proptest! {
    #[test]
    fn test_anchor_flip_shifts_by_size(
        off_x in -200.0f32..200.0,
        off_y in -200.0f32..200.0,
        w in 1.0f32..300.0,
        h in 1.0f32..300.0,
    ) {
        let frame = Rect::from_pos_size(Vec2::new(50.0, 80.0), Vec2::new(640.0, 480.0));
        let size = Vec2::new(w, h);
        let offset = Vec2::new(off_x, off_y);
        for &align in Align::all() {
            let at_zero = resolve(frame, align, offset, Vec2::ZERO, size);
            let at_one = resolve(frame, align, offset, Vec2::ONE, size);
            prop_assert_eq!(at_one, at_zero - size);
        }
    }
}

#[test]
fn test_hover_uses_inflated_rect() {
    let mut scene = scene();
    // 40x24 node at the screen origin
    let id = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft));

    scene.update(0.016, pointer_at(-4.0, -4.0, false));
    assert!(scene.node(id).unwrap().is_hovered(), "within 5-unit margin");

    scene.update(0.016, pointer_at(-6.0, -6.0, false));
    assert!(!scene.node(id).unwrap().is_hovered(), "outside the margin");
}

#[test]
fn test_press_and_release_are_edge_triggered() {
    let mut scene = scene();
    let id = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft));

    let events = scene.update(0.016, pointer_at(10.0, 10.0, true));
    assert_eq!(events, vec![NodeEvent::Pressed(id)]);
    assert!(scene.node(id).unwrap().is_pressed());

    // holding does not re-fire
    let events = scene.update(0.016, pointer_at(10.0, 10.0, true));
    assert!(events.is_empty());

    // dragging off keeps the press latched
    let events = scene.update(0.016, pointer_at(500.0, 500.0, true));
    assert!(events.is_empty());
    assert!(scene.node(id).unwrap().is_pressed());

    // release fires even though the pointer left the node
    let events = scene.update(0.016, pointer_at(500.0, 500.0, false));
    assert_eq!(events, vec![NodeEvent::Released(id)]);
    assert!(!scene.node(id).unwrap().is_pressed());
}

#[test]
fn test_disabled_subtree_is_skipped() {
    let mut scene = scene();
    let parent = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(200.0, 200.0), Align::TopLeft));
    let child = scene
        .add_child(parent, Node::new(Vec2::ZERO, Vec2::new(50.0, 50.0), Align::TopLeft))
        .unwrap();

    scene.set_enabled(parent, false);
    // jump past the fade so the flag actually flips
    scene.update(FADE_DURATION as f32 + 0.1, pointer_at(10.0, 10.0, false));
    assert!(!scene.node(parent).unwrap().is_enabled());

    let events = scene.update(0.016, pointer_at(10.0, 10.0, true));
    assert!(events.is_empty());
    assert!(!scene.node(child).unwrap().is_hovered());

    let mut surface = RecordingSurface::default();
    scene.draw(&mut surface);
    assert!(surface.calls.is_empty(), "disabled nodes draw nothing");
}

#[test]
fn test_blur_pushes_down_to_children() {
    let mut scene = scene();
    let parent = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(200.0, 200.0), Align::TopLeft));
    let child = scene
        .add_child(parent, Node::new(Vec2::ZERO, Vec2::new(50.0, 50.0), Align::TopLeft))
        .unwrap();

    // mid-disable the parent carries a forced blur while still enabled
    scene.set_enabled(parent, false);
    scene.update(FADE_DURATION as f32 * 0.5, PointerState::default());

    let parent_blur = scene.node(parent).unwrap().effective_blur();
    assert!(parent_blur > 0.0);
    assert_eq!(scene.node(child).unwrap().effective_blur(), parent_blur);
}

#[test]
fn test_enable_flag_asymmetry() {
    let mut scene = scene();
    let id = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft));

    // disabling keeps the node enabled until the fade completes
    scene.set_enabled(id, false);
    scene.update(FADE_DURATION as f32 * 0.5, PointerState::default());
    let node = scene.node(id).unwrap();
    assert!(node.is_enabled());
    assert!(node.alpha() < 1.0);

    scene.update(FADE_DURATION as f32, PointerState::default());
    assert!(!scene.node(id).unwrap().is_enabled());

    // enabling is interactive immediately, before any update ran
    scene.set_enabled(id, true);
    assert!(scene.node(id).unwrap().is_enabled());
    scene.update(FADE_DURATION as f32 * 0.25, PointerState::default());
    let node = scene.node(id).unwrap();
    assert!(node.is_enabled());
    assert!(node.alpha() < 1.0, "still fading in");
}

#[test]
fn test_rapid_toggle_reaches_clean_terminal_state() {
    let mut scene = scene();
    let id = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft));

    scene.set_enabled(id, false);
    scene.update(0.05, PointerState::default());
    scene.set_enabled(id, true);
    scene.update(FADE_DURATION as f32 + 0.1, PointerState::default());

    let node = scene.node(id).unwrap();
    assert!(node.is_enabled());
    assert_eq!(node.alpha(), 1.0, "no stuck partial alpha");
    assert_eq!(node.effective_blur(), 0.0);

    // and the other terminal direction
    scene.set_enabled(id, true);
    scene.update(0.05, PointerState::default());
    scene.set_enabled(id, false);
    scene.update(FADE_DURATION as f32 + 0.1, PointerState::default());

    let node = scene.node(id).unwrap();
    assert!(!node.is_enabled());
    assert_eq!(node.alpha(), 0.0);
}

#[test]
fn test_superseding_a_fade_snaps_the_flag() {
    let mut scene = scene();
    let id = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft));

    // interrupt an in-flight enable with a disable: flag must snap false
    // immediately rather than waiting for the new fade's completion
    scene.set_enabled(id, false);
    scene.update(FADE_DURATION as f32 + 0.1, PointerState::default());
    scene.set_enabled(id, true);
    scene.update(0.05, PointerState::default());
    scene.set_enabled(id, false);
    assert!(!scene.node(id).unwrap().is_enabled());
}

#[test]
fn test_children_draw_above_parent() {
    let mut scene = scene();
    let parent = scene.add_root(
        Node::new(Vec2::ZERO, Vec2::new(200.0, 200.0), Align::TopLeft)
            .with_color(Color::rgba(0.1, 0.1, 0.1, 1.0)),
    );
    scene
        .add_child(
            parent,
            Node::new(Vec2::ZERO, Vec2::new(50.0, 50.0), Align::Center)
                .with_color(Color::rgba(0.9, 0.9, 0.9, 1.0)),
        )
        .unwrap();
    scene.update(0.016, PointerState::default());

    let mut surface = RecordingSurface::default();
    scene.draw(&mut surface);
    assert_eq!(surface.calls.len(), 2);
    assert_eq!(surface.calls[0].1.width(), 200.0, "parent renders first");
    assert_eq!(surface.calls[1].1.width(), 50.0);
}

#[test]
fn test_draw_color_multiplies_animated_alpha() {
    let mut scene = scene();
    let id = scene.add_root(
        Node::new(Vec2::ZERO, Vec2::new(40.0, 24.0), Align::TopLeft)
            .with_color(Color::rgba(1.0, 1.0, 1.0, 0.8)),
    );
    scene.set_enabled(id, false);
    scene.update(FADE_DURATION as f32 * 0.5, PointerState::default());

    let node = scene.node(id).unwrap();
    let expected = 0.8 * node.alpha();
    assert!((node.draw_color().a - expected).abs() < 1e-6);
    assert_eq!(node.color.a, 0.8, "stored color is not premultiplied");
}

struct TeardownProbe {
    torn_down: Arc<AtomicBool>,
}

impl Widget for TeardownProbe {
    fn update(&mut self, _dt: f32) {}
    fn draw(&self, _ctx: &DrawContext, _surface: &mut dyn DrawSurface) {}
    fn teardown(&mut self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_remove_recurses_children_first_and_tears_down_widgets() {
    let mut scene = scene();
    let torn_down = Arc::new(AtomicBool::new(false));

    let parent = scene.add_root(Node::new(Vec2::ZERO, Vec2::new(200.0, 200.0), Align::TopLeft));
    scene
        .add_child(
            parent,
            Node::new(Vec2::ZERO, Vec2::new(50.0, 50.0), Align::Center).with_widget(Box::new(
                TeardownProbe {
                    torn_down: Arc::clone(&torn_down),
                },
            )),
        )
        .unwrap();

    scene.remove(parent);
    assert!(torn_down.load(Ordering::SeqCst));
    assert!(scene.is_empty());
}

#[test]
fn test_add_child_to_unknown_parent_fails() {
    let mut scene = scene();
    let err = scene
        .add_child(999, Node::new(Vec2::ZERO, Vec2::ONE, Align::TopLeft))
        .unwrap_err();
    assert!(err.to_string().contains("999"));
}
