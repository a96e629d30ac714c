//! Core types for the byeol space scene.
//!
//! Plain value types shared by the scene animator, the config layer and
//! the terminal frontend: fidelity tiers and their parameter sets,
//! color math, and viewport/pointer state.

mod color;
mod tier;
mod viewport;

pub use color::{Rgb, hsl_to_rgb};
pub use tier::{Density, GradientStop, Palette, ResetPolicy, Tier, TierConfig};
pub use viewport::{Pointer, Viewport};
