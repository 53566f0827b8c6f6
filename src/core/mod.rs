//! Core types describing particles, the viewport, and shared data.

pub mod particle;
pub mod types;

pub use particle::{Particle, ParticleId};
pub use types::Viewport;
