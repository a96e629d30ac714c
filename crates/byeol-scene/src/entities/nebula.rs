//! Large soft nebula glows drifting across the background.

use byeol_core::{Rgb, Viewport};
use rand::Rng;

use crate::surface::{Paint, Surface};

/// A nebula: a layered radial glow with a slow horizontal drift.
#[derive(Debug, Clone)]
pub struct Nebula {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    /// Horizontal drift per tick; nebulae wrap horizontally only.
    pub drift: f32,
    /// Two tint layers, outer then inner.
    pub tints: [Rgb; 2],
}

/// Draw one nebula sized relative to the viewport's smaller dimension.
pub fn spawn(viewport: &Viewport, tint_pool: &[Rgb; 4], rng: &mut impl Rng) -> Nebula {
    let base = viewport.width.min(viewport.height);
    let sign = if rng.gen_range(0..2) == 0 { 1.0 } else { -1.0 };
    let first = rng.gen_range(0..tint_pool.len());
    let second = (first + rng.gen_range(1..tint_pool.len())) % tint_pool.len();
    Nebula {
        x: rng.gen_range(0.0..viewport.width),
        y: rng.gen_range(0.0..viewport.height),
        radius: rng.gen_range(base * 0.15..base * 0.4),
        opacity: rng.gen_range(0.04..0.1),
        drift: sign * rng.gen_range(0.05..0.15),
        tints: [tint_pool[first], tint_pool[second]],
    }
}

impl Nebula {
    /// Advance one tick; wrap horizontally once fully off-screen.
    pub fn update(&mut self, viewport: &Viewport) {
        self.x += self.drift;
        if self.x - self.radius > viewport.width {
            self.x = -self.radius;
        } else if self.x + self.radius < 0.0 {
            self.x = viewport.width + self.radius;
        }
    }

    /// Shared pulse factor scaling every glow layer.
    pub fn pulse(&self, time: u64) -> f32 {
        (time as f32 * 0.002 + self.x * 0.001).sin() * 0.2 + 0.8
    }
}

/// Draw all nebulae as layered radial gradients, one per tint.
pub fn draw(nebulae: &[Nebula], surface: &mut dyn Surface, time: u64) {
    for nebula in nebulae {
        let pulse = nebula.pulse(time);
        for (i, tint) in nebula.tints.iter().enumerate() {
            let layer = 1.0 - i as f32 * 0.4;
            surface.fill_radial_glow(
                nebula.x,
                nebula.y,
                nebula.radius * layer * pulse,
                Paint::new(*tint, nebula.opacity * pulse),
            );
        }
    }
}
