//! Simulation dynamics: force generators and Verlet integration.

pub mod forces;
pub mod integrator;

pub use forces::{ForceGenerator, GravityForce};
pub use integrator::Integrator;
