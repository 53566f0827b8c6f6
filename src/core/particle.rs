use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of a particle inside the world. Particles are never removed, so indices stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

impl ParticleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Circular particle stored as two position snapshots (Verlet state).
///
/// Velocity is never stored: it is `position - previous_position`. Collision
/// and boundary responses encode impulses by rewriting `previous_position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub previous_position: DVec2,
    /// Acceleration summed since the last integration step.
    pub accumulated_force: DVec2,
}

impl Particle {
    /// Creates a particle with the given initial per-step velocity.
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self {
            position,
            previous_position: position - velocity,
            accumulated_force: DVec2::ZERO,
        }
    }

    /// Creates a particle at rest.
    pub fn at_rest(position: DVec2) -> Self {
        Self::new(position, DVec2::ZERO)
    }

    /// Creates a particle drifting with a random velocity in `[-jitter, jitter]` per axis.
    pub fn with_jitter<R: Rng + ?Sized>(position: DVec2, jitter: f64, rng: &mut R) -> Self {
        let velocity = if jitter > 0.0 {
            DVec2::new(
                rng.gen_range(-jitter..=jitter),
                rng.gen_range(-jitter..=jitter),
            )
        } else {
            DVec2::ZERO
        };
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: DVec2) {
        self.accumulated_force += force;
    }

    /// Displacement over the last step.
    pub fn velocity(&self) -> DVec2 {
        self.position - self.previous_position
    }

    pub fn speed(&self) -> f64 {
        self.velocity().length()
    }

    /// Overwrites the velocity while keeping the current position.
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.previous_position = self.position - velocity;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.previous_position.is_finite()
    }
}
