//! Pixel surface abstraction and the terminal-backed framebuffer.

use byeol_core::Rgb;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// A color applied at an opacity in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
}

impl Paint {
    pub fn new(color: Rgb, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// Drawing primitives consumed by the scene renderer.
///
/// The scene only consumes these; it never owns the surface's storage.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> (usize, usize);

    /// Resize the backing store. Contents after a resize are undefined
    /// until the next full-surface fill.
    fn resize(&mut self, width: usize, height: usize);

    /// Fill the whole surface with a diagonal multi-stop linear
    /// gradient. Stops must be sorted by position in [0, 1]. This is
    /// the scene's implicit per-frame clear.
    fn fill_linear_gradient(&mut self, stops: &[(f32, Rgb)]);

    /// Fill a disc.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Stroke a one-pixel circle outline.
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Draw a one-pixel line between two points.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: Paint);

    /// Blend a soft radial glow: full paint alpha at the center,
    /// quadratic falloff to zero at `radius`.
    fn fill_radial_glow(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Darken pixels toward the surface corners. `strength` is the
    /// blend factor at the far corners, 0 at the center.
    fn fill_vignette(&mut self, strength: f32);
}

/// RGB framebuffer rendered to the terminal with half-block cells.
///
/// Each terminal cell carries two vertical pixels ('▀' with the upper
/// pixel as foreground and the lower as background), so a scene of
/// w × h pixels occupies w × h/2 cells.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a buffer of the given pixel dimensions, cleared to black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Read a pixel; out-of-bounds reads return black.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Rgb::BLACK
        }
    }

    /// Blend `color` over the pixel at (x, y); out-of-bounds writes are
    /// silently dropped so entities straddling an edge need no clipping.
    fn blend_pixel(&mut self, x: isize, y: isize, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.pixels[idx] = self.pixels[idx].blend(color, alpha);
    }

    /// Convert the buffer into terminal lines, two pixel rows per cell
    /// row. An odd final pixel row pairs with black.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let rows = self.height.div_ceil(2);
        (0..rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let top = self.pixel(x, row * 2);
                        let bottom = self.pixel(x, row * 2 + 1);
                        Span::styled(
                            "▀",
                            Style::new().fg(top.into()).bg(bottom.into()),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![Rgb::BLACK; width * height];
        }
    }

    fn fill_linear_gradient(&mut self, stops: &[(f32, Rgb)]) {
        if self.width == 0 || self.height == 0 || stops.is_empty() {
            return;
        }
        let span = (self.width + self.height) as f32 - 2.0;
        for y in 0..self.height {
            for x in 0..self.width {
                let t = if span > 0.0 {
                    (x + y) as f32 / span
                } else {
                    0.0
                };
                self.pixels[y * self.width + x] = gradient_at(stops, t);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        if paint.alpha <= 0.0 {
            return;
        }
        let r = radius.max(0.0);
        let (x0, x1) = ((cx - r).floor() as isize, (cx + r).ceil() as isize);
        let (y0, y1) = ((cy - r).floor() as isize, (cy + r).ceil() as isize);
        let mut covered = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend_pixel(x, y, paint.color, paint.alpha);
                    covered = true;
                }
            }
        }
        // Sub-pixel discs still land on their nearest pixel.
        if !covered {
            self.blend_pixel(cx.round() as isize, cy.round() as isize, paint.color, paint.alpha);
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        if paint.alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        // Walk the circumference at roughly one step per pixel.
        let steps = (radius * std::f32::consts::TAU).ceil().max(8.0) as usize;
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            let x = (cx + a.cos() * radius).round() as isize;
            let y = (cy + a.sin() * radius).round() as isize;
            self.blend_pixel(x, y, paint.color, paint.alpha);
        }
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: Paint) {
        if paint.alpha <= 0.0 {
            return;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        let mut last = (isize::MIN, isize::MIN);
        for i in 0..=steps as usize {
            let t = i as f32 / steps;
            let x = (x0 + dx * t).round() as isize;
            let y = (y0 + dy * t).round() as isize;
            if (x, y) != last {
                self.blend_pixel(x, y, paint.color, paint.alpha);
                last = (x, y);
            }
        }
    }

    fn fill_radial_glow(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        if paint.alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        let (x0, x1) = ((cx - radius).floor() as isize, (cx + radius).ceil() as isize);
        let (y0, y1) = ((cy - radius).floor() as isize, (cy + radius).ceil() as isize);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d < radius {
                    let falloff = 1.0 - d / radius;
                    self.blend_pixel(x, y, paint.color, paint.alpha * falloff * falloff);
                }
            }
        }
    }

    fn fill_vignette(&mut self, strength: f32) {
        if strength <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let max_d = (cx * cx + cy * cy).sqrt().max(1.0);
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let t = ((dx * dx + dy * dy).sqrt() / max_d).min(1.0);
                let idx = y * self.width + x;
                self.pixels[idx] = self.pixels[idx].blend(Rgb::BLACK, t * t * strength);
            }
        }
    }
}

/// Piecewise-linear gradient lookup at position `t` in [0, 1].
fn gradient_at(stops: &[(f32, Rgb)], t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mut prev = stops[0];
    if t <= prev.0 {
        return prev.1;
    }
    for &stop in &stops[1..] {
        if t <= stop.0 {
            let span = stop.0 - prev.0;
            let local = if span > 0.0 { (t - prev.0) / span } else { 1.0 };
            return prev.1.lerp(stop.1, local);
        }
        prev = stop;
    }
    prev.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Paint {
        Paint::new(Rgb::new(255, 255, 255), 1.0)
    }

    #[test]
    fn test_gradient_at_stops_and_between() {
        let stops = [
            (0.0, Rgb::new(0, 0, 0)),
            (0.5, Rgb::new(100, 100, 100)),
            (1.0, Rgb::new(200, 200, 200)),
        ];
        assert_eq!(gradient_at(&stops, 0.0), Rgb::new(0, 0, 0));
        assert_eq!(gradient_at(&stops, 0.5), Rgb::new(100, 100, 100));
        assert_eq!(gradient_at(&stops, 1.0), Rgb::new(200, 200, 200));
        let mid = gradient_at(&stops, 0.25);
        assert_eq!(mid, Rgb::new(50, 50, 50));
    }

    #[test]
    fn test_fill_gradient_covers_corners() {
        let mut buf = PixelBuffer::new(4, 4);
        let stops = [(0.0, Rgb::new(10, 0, 0)), (1.0, Rgb::new(250, 0, 0))];
        buf.fill_linear_gradient(&stops);
        assert_eq!(buf.pixel(0, 0), Rgb::new(10, 0, 0));
        assert_eq!(buf.pixel(3, 3), Rgb::new(250, 0, 0));
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut buf = PixelBuffer::new(10, 10);
        buf.draw_line(1.0, 1.0, 8.0, 5.0, white());
        assert_eq!(buf.pixel(1, 1), Rgb::new(255, 255, 255));
        assert_eq!(buf.pixel(8, 5), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_out_of_bounds_draws_are_dropped() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_circle(-10.0, -10.0, 2.0, white());
        buf.draw_line(-5.0, 2.0, 12.0, 2.0, white());
        // In-bounds portion of the line landed, nothing panicked.
        assert_eq!(buf.pixel(2, 2), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_blend_is_proportional() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.fill_circle(0.0, 0.0, 0.6, Paint::new(Rgb::new(255, 255, 255), 0.5));
        let p = buf.pixel(0, 0);
        assert_eq!(p, Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_to_lines_dimensions() {
        let buf = PixelBuffer::new(6, 5);
        let lines = buf.to_lines();
        // 5 pixel rows pack into 3 cell rows.
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans.len(), 6);
    }

    #[test]
    fn test_zero_area_surface_is_noop() {
        let mut buf = PixelBuffer::new(0, 0);
        let stops = [(0.0, Rgb::BLACK), (1.0, Rgb::new(255, 255, 255))];
        buf.fill_linear_gradient(&stops);
        buf.fill_vignette(0.5);
        assert_eq!(buf.to_lines().len(), 0);
    }
}
