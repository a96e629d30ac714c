//! Scene-level render passes: background clear, grid overlay, vignette.
//!
//! Layer order is back to front: background gradient → grid → nebulae
//! → node edges → particles → nodes → stars → vignette. The entity
//! layers live with their entity modules; this module holds the passes
//! that belong to the whole frame.

use byeol_core::TierConfig;

use crate::surface::{Paint, Surface};

/// Grid line spacing in pixels.
pub const GRID_SPACING: f32 = 100.0;

/// Vignette blend factor at the corners.
pub const VIGNETTE_STRENGTH: f32 = 0.5;

/// Fill the background gradient — the implicit per-frame clear.
pub fn draw_background(surface: &mut dyn Surface, config: &TierConfig) {
    surface.fill_linear_gradient(&config.palette.background);
}

/// Grid overlay opacity for a given tick; oscillates slowly and never
/// reaches zero.
pub fn grid_opacity(time: u64) -> f32 {
    (time as f32 * 0.001).sin() * 0.02 + 0.03
}

/// Draw the faint full-viewport grid.
pub fn draw_grid(surface: &mut dyn Surface, config: &TierConfig, time: u64) {
    let (w, h) = surface.size();
    let paint = Paint::new(config.palette.grid, grid_opacity(time));

    let mut x = 0.0;
    while x < w as f32 {
        surface.draw_line(x, 0.0, x, h as f32 - 1.0, paint);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < h as f32 {
        surface.draw_line(0.0, y, w as f32 - 1.0, y, paint);
        y += GRID_SPACING;
    }
}

/// Darken the frame toward its corners.
pub fn draw_vignette(surface: &mut dyn Surface) {
    surface.fill_vignette(VIGNETTE_STRENGTH);
}
