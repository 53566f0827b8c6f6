use glam::DVec2;

use crate::core::particle::Particle;

/// Trait describing an external force generator applied to particles.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, particle: &mut Particle, dt: f64);

    fn apply_all(&self, particles: &mut [Particle], dt: f64) {
        for particle in particles.iter_mut() {
            self.apply(particle, dt);
        }
    }
}

/// Uniform downward gravity. Positive magnitudes pull toward larger Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityForce {
    pub magnitude: f64,
}

impl GravityForce {
    pub fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }

    pub fn acceleration(&self) -> DVec2 {
        DVec2::new(0.0, self.magnitude)
    }
}

impl ForceGenerator for GravityForce {
    fn apply(&self, particle: &mut Particle, _dt: f64) {
        particle.apply_force(self.acceleration());
    }
}
