//! Scene entities and their per-tick update rules.

pub mod nebula;
pub mod node;
pub mod particle;
pub mod star;

pub use nebula::Nebula;
pub use node::Node;
pub use particle::Particle;
pub use star::Star;
