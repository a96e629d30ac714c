//! Drifting particles with toroidal wrap and optional lifetimes.

use byeol_core::{ResetPolicy, TierConfig, Viewport, hsl_to_rgb};
use rand::Rng;

use crate::surface::{Paint, Surface};

/// Particles wrap once they are this far past an edge.
pub const WRAP_MARGIN: f32 = 10.0;

/// Life lost per tick in the life-tracked tier.
pub const LIFE_DECAY: f32 = 0.002;

/// A drifting background particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub base_opacity: f32,
    /// Hue in degrees; lightness/saturation are fixed by the renderer.
    pub hue: f32,
    /// Remaining life in [0, 1]; only consumed when the tier tracks it.
    pub life: f32,
}

/// Draw one particle with fields over the design ranges.
pub fn spawn(viewport: &Viewport, config: &TierConfig, rng: &mut impl Rng) -> Particle {
    let palette = &config.palette;
    Particle {
        x: rng.gen_range(0.0..viewport.width),
        y: rng.gen_range(0.0..viewport.height),
        vx: rng.gen_range(-0.15..0.15),
        vy: rng.gen_range(-0.15..0.15),
        radius: rng.gen_range(0.5..2.0),
        base_opacity: rng.gen_range(0.1..0.5),
        hue: rng.gen_range(palette.particle_hue_min..palette.particle_hue_max),
        life: if config.enable_particle_life {
            rng.gen_range(0.2..1.0)
        } else {
            1.0
        },
    }
}

impl Particle {
    /// Advance one tick: drift, then wrap or respawn per policy.
    pub fn update(
        &mut self,
        viewport: &Viewport,
        config: &TierConfig,
        rng: &mut impl Rng,
    ) {
        self.x += self.vx;
        self.y += self.vy;

        if config.enable_particle_life {
            self.life -= LIFE_DECAY;
        }

        let exited = self.is_outside(viewport);
        let depleted = config.enable_particle_life && self.life <= 0.0;
        let respawns = config.reset_policy == ResetPolicy::RespawnOnExit;

        if depleted || (exited && respawns) {
            *self = spawn(viewport, config, rng);
        } else if exited {
            self.wrap(viewport);
        }
    }

    /// Whether the position lies beyond the wrap margin on either axis.
    fn is_outside(&self, viewport: &Viewport) -> bool {
        self.x < -WRAP_MARGIN
            || self.x > viewport.width + WRAP_MARGIN
            || self.y < -WRAP_MARGIN
            || self.y > viewport.height + WRAP_MARGIN
    }

    /// Toroidal wrap: reappear at the opposite margin, per axis.
    fn wrap(&mut self, viewport: &Viewport) {
        if self.x < -WRAP_MARGIN {
            self.x = viewport.width + WRAP_MARGIN;
        } else if self.x > viewport.width + WRAP_MARGIN {
            self.x = -WRAP_MARGIN;
        }
        if self.y < -WRAP_MARGIN {
            self.y = viewport.height + WRAP_MARGIN;
        } else if self.y > viewport.height + WRAP_MARGIN {
            self.y = -WRAP_MARGIN;
        }
    }

    /// Slow breathing modulation of radius and opacity.
    pub fn pulse(&self, time: u64) -> f32 {
        (time as f32 * 0.003 + self.x).sin() * 0.3 + 0.7
    }
}

/// Draw all particles.
pub fn draw(particles: &[Particle], surface: &mut dyn Surface, time: u64) {
    for p in particles {
        let pulse = p.pulse(time);
        let color = hsl_to_rgb(p.hue, 1.0, 0.6);
        surface.fill_circle(
            p.x,
            p.y,
            p.radius * pulse,
            Paint::new(color, p.base_opacity * pulse * 0.8),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byeol_core::Tier;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn wrap_config() -> TierConfig {
        Tier::Basic.config()
    }

    fn respawn_config() -> TierConfig {
        Tier::Cinematic.config()
    }

    fn test_particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
            base_opacity: 0.3,
            hue: 220.0,
            life: 1.0,
        }
    }

    #[test]
    fn test_wrap_left_edge_scenario() {
        // x=-15, vx=-0.2, margin=10, width=800: after one update the
        // particle crosses the margin and wraps to width + margin.
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = test_particle(-15.0, 100.0, -0.2, 0.0);
        p.update(&viewport, &wrap_config(), &mut rng);
        assert_eq!(p.x, 810.0);
        // The other axis and the velocity are untouched.
        assert_eq!(p.y, 100.0);
        assert_eq!(p.vx, -0.2);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_wrap_right_and_vertical_edges() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(2);

        let mut p = test_particle(810.0, 50.0, 0.5, 0.0);
        p.update(&viewport, &wrap_config(), &mut rng);
        assert_eq!(p.x, -10.0);

        let mut p = test_particle(50.0, -10.2, 0.0, -0.1);
        p.update(&viewport, &wrap_config(), &mut rng);
        assert_eq!(p.y, 610.0);

        let mut p = test_particle(50.0, 610.0, 0.0, 0.2);
        p.update(&viewport, &wrap_config(), &mut rng);
        assert_eq!(p.y, -10.0);
    }

    #[test]
    fn test_in_bounds_drift_does_not_wrap() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = test_particle(100.0, 100.0, 0.1, -0.1);
        p.update(&viewport, &wrap_config(), &mut rng);
        assert!((p.x - 100.1).abs() < 1e-4);
        assert!((p.y - 99.9).abs() < 1e-4);
    }

    #[test]
    fn test_life_depletion_respawns_all_fields() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = test_particle(100.0, 100.0, 0.1, 0.1);
        p.life = LIFE_DECAY / 2.0; // depletes this tick
        p.update(&viewport, &respawn_config(), &mut rng);
        assert!(p.life > 0.0);
        assert!(p.x >= 0.0 && p.x < 800.0);
        assert!(p.y >= 0.0 && p.y < 600.0);
    }

    #[test]
    fn test_exit_respawns_under_respawn_policy() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = test_particle(-15.0, 100.0, -0.2, 0.0);
        p.update(&viewport, &respawn_config(), &mut rng);
        // Fully re-rolled instead of wrapped.
        assert!(p.x >= 0.0 && p.x < 800.0);
    }

    #[test]
    fn test_wrap_policy_preserves_life() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(6);
        let mut p = test_particle(-15.0, 100.0, -0.2, 0.0);
        p.life = 0.5;
        p.update(&viewport, &wrap_config(), &mut rng);
        assert_eq!(p.life, 0.5);
    }

    #[test]
    fn test_pulse_stays_in_band() {
        let p = test_particle(123.0, 0.0, 0.0, 0.0);
        for t in 0..5000 {
            let pulse = p.pulse(t);
            assert!((0.4..=1.0).contains(&pulse));
        }
    }
}
