//! Retained-mode scene graph: node arena, layout resolution, and the
//! per-frame update/draw traversal.
//!
//! The tree is stored as an id-keyed arena: children are exclusively owned
//! by their parent's child list, and the parent back-reference is a plain
//! [`NodeId`], so no ownership cycles are possible. The frame driver calls
//! [`Scene::update`] then [`Scene::draw`] once per tick, single-threaded.

pub mod align;
pub mod fade;

pub use align::{resolve, Align};
pub use fade::Fade;

use crate::geometry::{Color, Rect, Vec2};
use crate::surface::DrawSurface;
use crate::CoreError;
use std::collections::HashMap;
use tracing::trace;

/// Identifier of a node within a [`Scene`]
pub type NodeId = u64;

/// Margin by which a node's interaction rectangle is inflated beyond its
/// draw rectangle when testing hover
pub const HOVER_MARGIN: f32 = 5.0;

/// Pointer position and button state, sampled once per tick by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Pointer position in screen coordinates
    pub position: Vec2,
    /// Whether the primary button is down
    pub down: bool,
}

/// Edge-triggered interaction event raised during an update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    /// Hover-and-button-down became true for this node this frame
    Pressed(NodeId),
    /// The button was released while this node was pressed.
    ///
    /// Fires even if the pointer has left the node ("drag-off release").
    Released(NodeId),
}

/// Per-draw state handed to a widget alongside the surface.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    /// Resolved draw rectangle of the owning node
    pub rect: Rect,
    /// Current animated alpha of the owning node
    pub alpha: f32,
    /// Effective blur of the owning node (0 = none)
    pub blur: f32,
}

/// Behavior attached to a scene node.
///
/// Widgets receive one `update` and one `draw` per tick while their node
/// is enabled, and a `teardown` before the node leaves the tree.
pub trait Widget {
    /// Advance widget state by `dt` seconds (update pass)
    fn update(&mut self, dt: f32);
    /// Render the widget into its node's rectangle (draw pass)
    fn draw(&self, ctx: &DrawContext, surface: &mut dyn DrawSurface);
    /// Release external subscriptions before the node is removed
    fn teardown(&mut self) {}
}

/// A single scene-graph node.
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Raw position relative to the alignment origin
    pub position: Vec2,
    /// Additional local offset
    pub offset: Vec2,
    /// Fraction of the node's own footprint that lands on the origin
    pub anchor: Vec2,
    /// Node size
    pub size: Vec2,
    /// Alignment category within the reference frame
    pub align: Align,
    /// Corner radius of the background shape
    pub corner_radius: f32,
    /// Background color (fully transparent draws nothing)
    pub color: Color,
    enabled: bool,
    hovered: bool,
    pressed: bool,
    alpha: f32,
    forced_blur: f32,
    imposed_blur: f32,
    resolved: Vec2,
    fade: Option<Fade>,
    widget: Option<Box<dyn Widget>>,
}

impl Node {
    /// Create a node with the given raw position, size and alignment
    pub fn new(position: Vec2, size: Vec2, align: Align) -> Self {
        Self {
            id: 0,
            parent: None,
            children: Vec::new(),
            position,
            offset: Vec2::ZERO,
            anchor: Vec2::ZERO,
            size,
            align,
            corner_radius: 0.0,
            color: Color::TRANSPARENT,
            enabled: true,
            hovered: false,
            pressed: false,
            alpha: 1.0,
            forced_blur: 0.0,
            imposed_blur: 0.0,
            resolved: Vec2::ZERO,
            fade: None,
            widget: None,
        }
    }

    /// Set the local offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Set the anchor fraction
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the background color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the corner radius
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Attach a widget
    pub fn with_widget(mut self, widget: Box<dyn Widget>) -> Self {
        self.widget = Some(widget);
        self
    }

    /// This node's id
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent id, absent for roots
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child ids
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node participates in update/draw
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the pointer was over the node last update
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the node is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Current animated alpha
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Max of the blur imposed by ancestors and the locally-forced blur
    pub fn effective_blur(&self) -> f32 {
        self.imposed_blur.max(self.forced_blur)
    }

    /// Resolved draw rectangle from the last update pass
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.resolved, self.size)
    }

    /// Effective draw color: stored color with the alpha multiplied by the
    /// current animated alpha, computed at read time
    pub fn draw_color(&self) -> Color {
        self.color.faded(self.alpha)
    }

    /// Widget attached to this node, if any
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }
}

/// Scene graph owning all nodes and driving the per-tick traversal.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: NodeId,
    screen: Vec2,
    time: f64,
}

impl Scene {
    /// Create an empty scene for a screen of the given size
    pub fn new(screen: Vec2) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
            screen,
            time: 0.0,
        }
    }

    /// Screen rectangle used as the reference frame for roots
    pub fn screen_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.screen)
    }

    /// Update the screen size (e.g. on display change)
    pub fn set_screen(&mut self, screen: Vec2) {
        self.screen = screen;
    }

    /// Scene clock in seconds, accumulated from update deltas
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Add a node without a parent; its reference frame is the screen
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, CoreError> {
        if !self.nodes.contains_key(&parent) {
            return Err(CoreError::UnknownNode(parent));
        }
        let id = self.insert(node, Some(parent));
        self.nodes
            .get_mut(&parent)
            .expect("parent checked above")
            .children
            .push(id);
        Ok(id)
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        node.id = id;
        node.parent = parent;
        self.nodes.insert(id, node);
        id
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Answer "where would a box with these placement attributes land"
    /// relative to `parent` (or the screen when absent).
    ///
    /// Shares [`align::resolve`] with the traversal's self-resolution, so
    /// the two paths cannot drift.
    pub fn resolve_at(
        &self,
        parent: Option<NodeId>,
        align: Align,
        offset: Vec2,
        anchor: Vec2,
        size: Vec2,
    ) -> Vec2 {
        let frame = match parent.and_then(|p| self.nodes.get(&p)) {
            Some(p) => p.rect(),
            None => self.screen_rect(),
        };
        align::resolve(frame, align, offset, anchor, size)
    }

    /// Start an animated transition of `id` toward `enabled`.
    ///
    /// A running transition is superseded: the enabled flag snaps to the
    /// new target's final value immediately while alpha/blur restart from
    /// their current animated values. A fresh enable makes the node
    /// interactive from the first step; a fresh disable keeps it enabled
    /// until the fade completes.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        let now = self.time;
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if let Some(active) = node.fade.take() {
            let s = active.sample(now);
            node.alpha = s.alpha;
            node.forced_blur = s.blur;
            node.enabled = enabled;
        } else if enabled {
            node.enabled = true;
        }
        node.fade = Some(Fade::start(enabled, now, node.alpha, node.forced_blur));
        trace!(node = id, enabled, "visibility transition started");
    }

    /// Run one update pass over the tree.
    ///
    /// Pre-order, single-threaded, cooperative: fades are sampled, layout
    /// is resolved, hover/press state is recomputed against `pointer`,
    /// blur is pushed down, and widgets advance. Disabled subtrees are
    /// skipped entirely. Returns the edge-triggered events of this tick.
    pub fn update(&mut self, dt: f32, pointer: PointerState) -> Vec<NodeEvent> {
        self.time += dt as f64;
        let mut events = Vec::new();
        let screen = self.screen_rect();
        let roots = self.roots.clone();
        for root in roots {
            self.update_node(root, screen, 0.0, dt, pointer, &mut events);
        }
        events
    }

    fn update_node(
        &mut self,
        id: NodeId,
        frame: Rect,
        imposed_blur: f32,
        dt: f32,
        pointer: PointerState,
        events: &mut Vec<NodeEvent>,
    ) {
        let now = self.time;
        let (children, child_frame, child_blur) = {
            let Some(node) = self.nodes.get_mut(&id) else {
                return;
            };

            if let Some(active) = node.fade {
                let s = active.sample(now);
                node.alpha = s.alpha;
                node.forced_blur = s.blur;
                if let Some(enabled) = s.enabled {
                    node.enabled = enabled;
                }
                if s.done {
                    node.fade = None;
                }
            }

            if !node.enabled {
                node.hovered = false;
                node.pressed = false;
                return;
            }

            node.imposed_blur = imposed_blur;
            node.resolved = align::resolve(
                frame,
                node.align,
                node.position + node.offset,
                node.anchor,
                node.size,
            );

            let hit_rect = node.rect().inflate(HOVER_MARGIN);
            let was_pressed = node.pressed;
            node.hovered = hit_rect.contains(pointer.position);
            if node.hovered && pointer.down && !was_pressed {
                node.pressed = true;
                events.push(NodeEvent::Pressed(id));
            } else if was_pressed && !pointer.down {
                node.pressed = false;
                events.push(NodeEvent::Released(id));
            }

            if let Some(widget) = node.widget.as_mut() {
                widget.update(dt);
            }

            (node.children.clone(), node.rect(), node.effective_blur())
        };

        for child in children {
            self.update_node(child, child_frame, child_blur, dt, pointer, events);
        }
    }

    /// Run one draw pass over the tree.
    ///
    /// Pre-order: a node draws its own shape before its children, so
    /// children composite above their parent. Disabled subtrees draw
    /// nothing.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        for &root in &self.roots {
            self.draw_node(root, surface);
        }
    }

    fn draw_node(&self, id: NodeId, surface: &mut dyn DrawSurface) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.enabled {
            return;
        }
        let rect = node.rect();
        let blur = node.effective_blur();
        let color = node.draw_color();
        if color.a > 0.0 {
            surface.fill_rounded_rect(rect, node.corner_radius, color, blur);
        }
        if let Some(widget) = node.widget.as_ref() {
            let ctx = DrawContext {
                rect,
                alpha: node.alpha,
                blur,
            };
            widget.draw(&ctx, surface);
        }
        for &child in &node.children {
            self.draw_node(child, surface);
        }
    }

    /// Remove a node and its entire subtree, children first.
    ///
    /// Each widget's `teardown` runs before its node is detached, so
    /// external subscriptions are released before the node is gone.
    pub fn remove(&mut self, id: NodeId) {
        let children = match self.nodes.get(&id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.remove(child);
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            if let Some(widget) = node.widget.as_mut() {
                widget.teardown();
            }
        }
        if let Some(node) = self.nodes.remove(&id) {
            match node.parent {
                Some(parent) => {
                    if let Some(p) = self.nodes.get_mut(&parent) {
                        p.children.retain(|&c| c != id);
                    }
                }
                None => self.roots.retain(|&r| r != id),
            }
        }
        trace!(node = id, "node removed");
    }

    /// Number of nodes currently in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
