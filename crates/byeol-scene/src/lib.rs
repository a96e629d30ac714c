//! Procedural space scene animation for the byeol terminal app.
//!
//! This crate owns the animated scene: star, particle, node and nebula
//! entities with their per-tick update rules, a pixel surface
//! abstraction, and the layered renderer. The frontend drives it with
//! one [`Scene::tick`] per frame and forwards resize and pointer
//! events; everything else lives here.

mod entities;
mod render;
mod scene;
mod surface;

pub use scene::Scene;
pub use surface::{Paint, PixelBuffer, Surface};
