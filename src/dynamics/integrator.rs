use glam::DVec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    config::{DEFAULT_AIR_FRICTION, DEFAULT_MAX_SPEED, DEFAULT_TIME_STEP, SimulationConfig},
    core::particle::Particle,
};

/// Störmer–Verlet integrator with air friction and a per-axis speed clamp.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub dt: f64,
    pub air_friction: f64,
    pub max_speed: f64,
    parallel: bool,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl Integrator {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            air_friction: DEFAULT_AIR_FRICTION,
            max_speed: DEFAULT_MAX_SPEED,
            parallel: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            dt: config.time_step,
            air_friction: config.air_friction,
            max_speed: config.max_speed,
            parallel: false,
        }
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    /// Advances one particle by `self.dt` and clears its accumulated force.
    pub fn integrate(&self, particle: &mut Particle) {
        let dt = self.dt;
        let velocity = particle.velocity() * self.air_friction;
        let velocity = velocity.clamp(
            DVec2::splat(-self.max_speed),
            DVec2::splat(self.max_speed),
        );

        particle.previous_position = particle.position;
        particle.position += velocity + particle.accumulated_force * (dt * dt);
        particle.accumulated_force = DVec2::ZERO;
    }

    pub fn step(&self, particles: &mut [Particle]) {
        if self.parallel {
            self.step_parallel(particles);
            return;
        }

        for particle in particles.iter_mut() {
            self.integrate(particle);
        }
    }

    #[cfg(feature = "parallel")]
    fn step_parallel(&self, particles: &mut [Particle]) {
        particles
            .par_iter_mut()
            .for_each(|particle| self.integrate(particle));
    }

    #[cfg(not(feature = "parallel"))]
    fn step_parallel(&self, particles: &mut [Particle]) {
        for particle in particles.iter_mut() {
            self.integrate(particle);
        }
    }
}
