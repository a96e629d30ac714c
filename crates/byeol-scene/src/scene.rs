//! The scene: entity collections, frame counter, update/render cycle.

use byeol_core::{Pointer, TierConfig, Viewport};
use rand::Rng;

use crate::entities::{Nebula, Node, Particle, Star, nebula, node, particle, star};
use crate::render;
use crate::surface::Surface;

/// One animated scene instance.
///
/// Owns every entity collection by value plus the monotonically
/// increasing frame counter. Resize and pointer events mutate the
/// stored viewport/pointer fields; the next tick reads the latest
/// values.
#[derive(Debug)]
pub struct Scene {
    config: TierConfig,
    viewport: Viewport,
    pointer: Pointer,
    stars: Vec<Star>,
    particles: Vec<Particle>,
    nodes: Vec<Node>,
    nebulae: Vec<Nebula>,
    /// Global time, advanced once per tick.
    time: u64,
}

/// Entity count for a density divisor: floor(area / divisor), never
/// negative, zero for a degenerate viewport.
fn density_count(viewport: &Viewport, divisor: f32) -> usize {
    if viewport.is_degenerate() || divisor <= 0.0 {
        return 0;
    }
    (viewport.area() as f64 / divisor as f64).floor() as usize
}

impl Scene {
    /// Create a scene and populate every enabled entity collection at
    /// a density derived from the viewport area.
    pub fn new(config: TierConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let stars = (0..density_count(&viewport, config.star_density_divisor))
            .map(|_| star::spawn(&viewport, rng))
            .collect();
        let particles = (0..density_count(&viewport, config.particle_density_divisor))
            .map(|_| particle::spawn(&viewport, &config, rng))
            .collect();
        let nodes = (0..node::count(&viewport, &config))
            .map(|_| node::spawn(&viewport, rng))
            .collect();
        let nebula_count = if config.enable_nebulae && !viewport.is_degenerate() {
            config.nebula_count
        } else {
            0
        };
        let nebulae = (0..nebula_count)
            .map(|_| nebula::spawn(&viewport, &config.palette.nebula_tints, rng))
            .collect();

        let pointer = Pointer::centered(&viewport);
        Self {
            config,
            viewport,
            pointer,
            stars,
            particles,
            nodes,
            nebulae,
            time: 0,
        }
    }

    /// Record a viewport-resized notification. Entities keep their
    /// absolute positions; anything now out of bounds self-corrects
    /// via its wrap/bounce rule on the next update. Cheap, and avoids
    /// the visual pop of a full re-seed.
    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
    }

    /// Record a pointer-moved notification.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.moved(x, y);
    }

    /// Advance every entity one tick.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.update();
        }
        for p in &mut self.particles {
            p.update(&self.viewport, &self.config, rng);
        }
        for n in &mut self.nodes {
            n.update(&self.viewport);
        }
        for n in &mut self.nebulae {
            n.update(&self.viewport);
        }
    }

    /// Draw the current state back to front.
    pub fn render(&self, surface: &mut dyn Surface) {
        render::draw_background(surface, &self.config);
        if self.config.enable_grid {
            render::draw_grid(surface, &self.config, self.time);
        }
        if self.config.enable_nebulae {
            nebula::draw(&self.nebulae, surface, self.time);
        }
        if self.config.enable_nodes {
            node::draw_edges(&self.nodes, surface, self.config.palette.edge);
        }
        particle::draw(&self.particles, surface, self.time);
        if self.config.enable_nodes {
            node::draw(&self.nodes, surface, self.config.palette.node, self.time);
        }
        star::draw(
            &self.stars,
            surface,
            &self.config,
            &self.viewport,
            &self.pointer,
        );
        if self.config.enable_vignette {
            render::draw_vignette(surface);
        }
    }

    /// One frame: update, render, advance global time. Update then
    /// render is strictly sequential within a tick.
    pub fn tick(&mut self, surface: &mut dyn Surface, rng: &mut impl Rng) {
        self.update(rng);
        self.render(surface);
        self.time = self.time.wrapping_add(1);
    }

    /// Current global time (frame counter).
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nebula_count(&self) -> usize {
        self.nebulae.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelBuffer;
    use byeol_core::{Density, Tier};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene(tier: Tier, w: f32, h: f32) -> Scene {
        let mut rng = StdRng::seed_from_u64(42);
        Scene::new(tier.config(), Viewport::new(w, h), &mut rng)
    }

    #[test]
    fn test_star_count_scenario() {
        // W=1920, H=1080, K_star=4000 (lightweight): floor = 518.
        let s = scene(Tier::Lightweight, 1920.0, 1080.0);
        assert_eq!(s.star_count(), 518);
    }

    #[test]
    fn test_counts_are_resolution_derived() {
        let s = scene(Tier::Basic, 1920.0, 1080.0);
        assert_eq!(s.star_count(), (1920 * 1080) / 15000);
        assert_eq!(s.particle_count(), (1920 * 1080) / 20000);
        assert_eq!(s.node_count(), 6 + 1920 / 400);
        // Basic tier has no nebulae.
        assert_eq!(s.nebula_count(), 0);
    }

    #[test]
    fn test_cinematic_features() {
        let s = scene(Tier::Cinematic, 1280.0, 720.0);
        assert_eq!(s.nebula_count(), 3);
        assert_eq!(s.node_count(), 0);
    }

    #[test]
    fn test_density_preset_scales_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = Tier::Lightweight.config().with_density(Density::Sparse);
        let s = Scene::new(config, Viewport::new(1920.0, 1080.0), &mut rng);
        assert_eq!(s.star_count(), 259);
    }

    #[test]
    fn test_degenerate_viewport_is_harmless() {
        let mut s = scene(Tier::Basic, 0.0, 1080.0);
        assert_eq!(s.star_count(), 0);
        assert_eq!(s.particle_count(), 0);
        assert_eq!(s.node_count(), 0);

        // Ticking against a zero-area surface is a no-op, not a crash.
        let mut surface = PixelBuffer::new(0, 0);
        let mut rng = StdRng::seed_from_u64(2);
        s.tick(&mut surface, &mut rng);
        assert_eq!(s.time(), 1);
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut s = scene(Tier::Lightweight, 1920.0, 1080.0);
        let before = s.star_count();
        s.handle_resize(640.0, 480.0);
        // No re-seed: same entities, new bounds.
        assert_eq!(s.star_count(), before);
        assert_eq!(s.viewport().width, 640.0);

        // Idempotent for repeated identical dimensions.
        s.handle_resize(640.0, 480.0);
        assert_eq!(*s.viewport(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn test_out_of_bounds_entities_self_correct_after_shrink() {
        let mut s = scene(Tier::Basic, 1920.0, 1080.0);
        s.handle_resize(200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(3);
        // Nodes clamp back inside the new bounds on the first update.
        s.update(&mut rng);
        for n in &s.nodes {
            assert!(n.x >= 0.0 && n.x <= 200.0);
            assert!(n.y >= 0.0 && n.y <= 100.0);
        }
    }

    #[test]
    fn test_time_advances_once_per_tick() {
        let mut s = scene(Tier::Lightweight, 320.0, 200.0);
        let mut surface = PixelBuffer::new(320, 200);
        let mut rng = StdRng::seed_from_u64(4);
        for expected in 1..=5 {
            s.tick(&mut surface, &mut rng);
            assert_eq!(s.time(), expected);
        }
    }

    #[test]
    fn test_render_fills_background() {
        let s = scene(Tier::Basic, 64.0, 64.0);
        let mut surface = PixelBuffer::new(64, 64);
        s.render(&mut surface);
        // Top-left is the first gradient stop (possibly overdrawn by a
        // grid line, whose opacity is too faint to blacken it).
        let p = surface.pixel(0, 0);
        assert_ne!(p, byeol_core::Rgb::BLACK);
    }

    #[test]
    fn test_pointer_shifts_rendered_stars_only() {
        let mut s = scene(Tier::Cinematic, 320.0, 200.0);
        let positions: Vec<(f32, f32)> = s.stars.iter().map(|st| (st.x, st.y)).collect();
        s.pointer_moved(10.0, 10.0);
        // Parallax is a render-time offset; stored positions are fixed.
        let after: Vec<(f32, f32)> = s.stars.iter().map(|st| (st.x, st.y)).collect();
        assert_eq!(positions, after);
    }
}
