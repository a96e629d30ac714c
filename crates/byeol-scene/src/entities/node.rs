//! Node graph with elastic bounce and proximity edges.

use byeol_core::{Rgb, TierConfig, Viewport};
use rand::Rng;

use crate::surface::{Paint, Surface};

/// Maximum distance at which two nodes are linked by an edge.
pub const MAX_LINK_DIST: f32 = 300.0;

/// Edge opacity at zero distance; fades linearly to zero at the link
/// distance.
pub const EDGE_OPACITY: f32 = 0.15;

/// Nodes are added per this many pixels of width, on top of the base
/// count. Kept sparse: edge drawing is O(n²) over the node count.
pub const WIDTH_PER_NODE: f32 = 400.0;

/// A node of the connection graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub opacity: f32,
}

/// Node count for a viewport: a constant base plus a slow growth with
/// width, bounded regardless of resolution.
pub fn count(viewport: &Viewport, config: &TierConfig) -> usize {
    if !config.enable_nodes || viewport.is_degenerate() {
        return 0;
    }
    config.node_base + (viewport.width / WIDTH_PER_NODE) as usize
}

/// Draw one node with fields over the design ranges.
pub fn spawn(viewport: &Viewport, rng: &mut impl Rng) -> Node {
    Node {
        x: rng.gen_range(0.0..viewport.width),
        y: rng.gen_range(0.0..viewport.height),
        vx: rng.gen_range(-0.075..0.075),
        vy: rng.gen_range(-0.075..0.075),
        radius: rng.gen_range(1.0..3.0),
        opacity: rng.gen_range(0.2..0.5),
    }
}

impl Node {
    /// Advance one tick: drift, bounce off edges, clamp into bounds.
    /// Reflection, not wraparound — this is what distinguishes nodes
    /// from particles.
    pub fn update(&mut self, viewport: &Viewport) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > viewport.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > viewport.height {
            self.vy = -self.vy;
        }

        self.x = self.x.clamp(0.0, viewport.width);
        self.y = self.y.clamp(0.0, viewport.height);
    }
}

/// Glow intensity shared by all nodes this tick (synchronized pulsing,
/// not per-entity phase).
pub fn glow(time: u64) -> f32 {
    (time as f32 * 0.004).sin() * 0.15 + 0.4
}

/// Edge opacity between two nodes at distance `d`, or `None` beyond
/// the link distance. Strictly decreasing in `d` over [0, max).
pub fn edge_opacity(d: f32) -> Option<f32> {
    if d < MAX_LINK_DIST {
        Some((1.0 - d / MAX_LINK_DIST) * EDGE_OPACITY)
    } else {
        None
    }
}

/// Draw the proximity edges between every close pair. O(n²), justified
/// only because `count` keeps n in the tens.
pub fn draw_edges(nodes: &[Node], surface: &mut dyn Surface, color: Rgb) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let dx = nodes[j].x - nodes[i].x;
            let dy = nodes[j].y - nodes[i].y;
            let dist = (dx * dx + dy * dy).sqrt();
            if let Some(alpha) = edge_opacity(dist) {
                surface.draw_line(
                    nodes[i].x,
                    nodes[i].y,
                    nodes[j].x,
                    nodes[j].y,
                    Paint::new(color, alpha),
                );
            }
        }
    }
}

/// Draw the nodes themselves with a halo ring simulating bloom.
pub fn draw(nodes: &[Node], surface: &mut dyn Surface, color: Rgb, time: u64) {
    let glow = glow(time);
    for node in nodes {
        surface.fill_circle(
            node.x,
            node.y,
            node.radius,
            Paint::new(color, node.opacity + glow * 0.2),
        );
        surface.stroke_circle(
            node.x,
            node.y,
            node.radius + 3.0 + glow * 2.0,
            Paint::new(color, node.opacity * 0.5 + glow * 0.1),
        );
    }
}
