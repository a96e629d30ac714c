//! Fidelity tiers and their parameter sets.
//!
//! The scene animator is a single implementation parameterized by a
//! [`TierConfig`]; each [`Tier`] is just a named preset of densities,
//! feature toggles and palette.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Fidelity tier controlling density and enabled visual features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Node graph and grid overlay over a medium star field.
    #[default]
    Basic,
    /// Dense plain star field, no extras.
    Lightweight,
    /// Nebulae, pointer parallax, particle lifetimes and a vignette.
    Cinematic,
}

impl Tier {
    /// Cycle to the next tier.
    pub fn next(self) -> Self {
        match self {
            Tier::Basic => Tier::Lightweight,
            Tier::Lightweight => Tier::Cinematic,
            Tier::Cinematic => Tier::Basic,
        }
    }

    /// Human-readable tier name.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Lightweight => "lightweight",
            Tier::Cinematic => "cinematic",
        }
    }

    /// The parameter preset for this tier.
    pub fn config(self) -> TierConfig {
        TierConfig::for_tier(self)
    }
}

/// Entity density preset scaling the per-tier area divisors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Sparse,
    #[default]
    Normal,
    Dense,
}

impl Density {
    /// Cycle to the next density preset.
    pub fn next(self) -> Self {
        match self {
            Density::Sparse => Density::Normal,
            Density::Normal => Density::Dense,
            Density::Dense => Density::Sparse,
        }
    }

    /// Human-readable preset name.
    pub fn name(self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Normal => "normal",
            Density::Dense => "dense",
        }
    }

    /// Multiplier applied to the tier's area divisors. Larger divisors
    /// mean fewer entities.
    pub fn divisor_factor(self) -> f32 {
        match self {
            Density::Sparse => 2.0,
            Density::Normal => 1.0,
            Density::Dense => 0.5,
        }
    }
}

/// What happens to a particle that leaves the viewport (or, in the
/// cinematic tier, runs out of life).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Reposition to the opposite edge, keeping all other fields.
    #[default]
    WrapOnly,
    /// Re-roll every mutable field on exit or life depletion.
    RespawnOnExit,
}

/// A color stop of the background gradient, position in [0, 1].
pub type GradientStop = (f32, Rgb);

/// Color palette for one tier.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Background gradient stops, back-to-front clear color.
    pub background: [GradientStop; 4],
    /// Star tint (twinkle scales its opacity).
    pub star: Rgb,
    /// Deep-field star tint, lerped in by star depth (cinematic).
    pub star_far: Rgb,
    /// Node fill and halo color.
    pub node: Rgb,
    /// Node connection edge color.
    pub edge: Rgb,
    /// Grid overlay color.
    pub grid: Rgb,
    /// Lower bound of the particle hue range (degrees).
    pub particle_hue_min: f32,
    /// Upper bound of the particle hue range (degrees).
    pub particle_hue_max: f32,
    /// Nebula tint pool; each nebula picks two.
    pub nebula_tints: [Rgb; 4],
}

impl Palette {
    /// Deep-space palette shared by all tiers.
    pub fn deep_space() -> Self {
        Self {
            background: [
                (0.0, Rgb::new(0x0a, 0x0a, 0x0f)),
                (0.3, Rgb::new(0x1a, 0x0f, 0x2e)),
                (0.6, Rgb::new(0x0f, 0x1a, 0x3c)),
                (1.0, Rgb::new(0x05, 0x08, 0x10)),
            ],
            star: Rgb::new(200, 200, 255),
            star_far: Rgb::new(110, 130, 220),
            node: Rgb::new(100, 150, 255),
            edge: Rgb::new(100, 150, 255),
            grid: Rgb::new(70, 100, 200),
            particle_hue_min: 200.0,
            particle_hue_max: 260.0,
            nebula_tints: [
                Rgb::new(138, 43, 226),
                Rgb::new(0, 191, 255),
                Rgb::new(255, 20, 147),
                Rgb::new(72, 61, 139),
            ],
        }
    }
}

/// Full parameter set for one scene instance.
///
/// The three original animator variants collapse into this one struct:
/// a tier is nothing more than a preset of these fields.
#[derive(Debug, Clone)]
pub struct TierConfig {
    /// Star count = floor(area / this).
    pub star_density_divisor: f32,
    /// Particle count = floor(area / this).
    pub particle_density_divisor: f32,
    /// Node count = this + floor(width / 400) when nodes are enabled.
    pub node_base: usize,
    /// Draw the node graph with proximity edges.
    pub enable_nodes: bool,
    /// Draw drifting nebula glows.
    pub enable_nebulae: bool,
    /// Offset stars by pointer displacement scaled by depth.
    pub enable_parallax: bool,
    /// Darken the frame toward its corners.
    pub enable_vignette: bool,
    /// Draw the faint oscillating grid overlay.
    pub enable_grid: bool,
    /// Track per-particle life and respawn on depletion.
    pub enable_particle_life: bool,
    /// Out-of-bounds handling for particles.
    pub reset_policy: ResetPolicy,
    /// Parallax strength; apparent shift = pointer offset * depth * this.
    pub parallax_strength: f32,
    /// Fixed nebula count (they are large background features, so the
    /// count does not scale with resolution).
    pub nebula_count: usize,
    pub palette: Palette,
}

impl TierConfig {
    /// The preset for the given tier.
    pub fn for_tier(tier: Tier) -> Self {
        let base = Self {
            star_density_divisor: 15000.0,
            particle_density_divisor: 20000.0,
            node_base: 6,
            enable_nodes: true,
            enable_nebulae: false,
            enable_parallax: false,
            enable_vignette: false,
            enable_grid: true,
            enable_particle_life: false,
            reset_policy: ResetPolicy::WrapOnly,
            parallax_strength: 0.05,
            nebula_count: 3,
            palette: Palette::deep_space(),
        };
        match tier {
            Tier::Basic => base,
            Tier::Lightweight => Self {
                star_density_divisor: 4000.0,
                particle_density_divisor: 9000.0,
                enable_nodes: false,
                enable_grid: false,
                ..base
            },
            Tier::Cinematic => Self {
                star_density_divisor: 2500.0,
                particle_density_divisor: 6000.0,
                enable_nodes: false,
                enable_grid: false,
                enable_nebulae: true,
                enable_parallax: true,
                enable_vignette: true,
                enable_particle_life: true,
                reset_policy: ResetPolicy::RespawnOnExit,
                ..base
            },
        }
    }

    /// Apply a density preset by scaling the area divisors.
    pub fn with_density(mut self, density: Density) -> Self {
        let f = density.divisor_factor();
        self.star_density_divisor *= f;
        self.particle_density_divisor *= f;
        self
    }

    /// Override the particle reset policy.
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}
