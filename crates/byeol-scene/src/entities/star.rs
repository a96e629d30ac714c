//! Twinkling stars with optional depth-based parallax.

use byeol_core::{Pointer, TierConfig, Viewport};
use rand::Rng;

use crate::surface::{Paint, Surface};

/// Stars never fully vanish; rendered opacity is floored here.
pub const OPACITY_FLOOR: f32 = 0.02;

/// A single background star.
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub base_opacity: f32,
    /// Twinkle phase, kept in [0, 2π).
    pub phase: f32,
    pub twinkle_speed: f32,
    /// Pseudo-depth in [0, 1]; nearer stars get a larger parallax shift.
    pub depth: f32,
}

/// Draw one star with fields over the design ranges.
pub fn spawn(viewport: &Viewport, rng: &mut impl Rng) -> Star {
    Star {
        x: rng.gen_range(0.0..viewport.width),
        y: rng.gen_range(0.0..viewport.height),
        radius: rng.gen_range(0.2..1.0),
        base_opacity: rng.gen_range(0.2..0.7),
        phase: rng.gen_range(0.0..std::f32::consts::TAU),
        twinkle_speed: rng.gen_range(0.005..0.025),
        depth: rng.gen_range(0.0..1.0),
    }
}

impl Star {
    /// Advance the twinkle phase one tick.
    pub fn update(&mut self) {
        self.phase = (self.phase + self.twinkle_speed) % std::f32::consts::TAU;
    }

    /// Opacity after twinkle modulation, never below the floor.
    pub fn rendered_opacity(&self) -> f32 {
        let twinkle = self.phase.sin() * 0.5 + 0.5;
        (self.base_opacity * twinkle).max(OPACITY_FLOOR)
    }

    /// Apparent position shift from pointer displacement. Nearer stars
    /// (higher depth) shift more; there is no real camera model.
    pub fn parallax_offset(&self, pointer: &Pointer, viewport: &Viewport, strength: f32) -> (f32, f32) {
        let (cx, cy) = viewport.center();
        (
            (pointer.x - cx) * self.depth * strength,
            (pointer.y - cy) * self.depth * strength,
        )
    }
}

/// Draw all stars, the topmost entity layer.
pub fn draw(
    stars: &[Star],
    surface: &mut dyn Surface,
    config: &TierConfig,
    viewport: &Viewport,
    pointer: &Pointer,
) {
    for star in stars {
        let (dx, dy) = if config.enable_parallax {
            star.parallax_offset(pointer, viewport, config.parallax_strength)
        } else {
            (0.0, 0.0)
        };
        let tint = config
            .palette
            .star_far
            .lerp(config.palette.star, star.depth);
        surface.fill_circle(
            star.x + dx,
            star.y + dy,
            star.radius,
            Paint::new(tint, star.rendered_opacity()),
        );
    }
}
