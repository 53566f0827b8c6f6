use glam::DVec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    config::{
        DEFAULT_FLOOR_FRICTION, DEFAULT_FLOOR_RESTITUTION, DEFAULT_RADIUS, DEFAULT_REST_GRAVITY,
        DEFAULT_REST_SPEED, DEFAULT_WALL_RESTITUTION, SimulationConfig,
    },
    core::{particle::Particle, types::Viewport},
};

/// What the boundary pass saw for one particle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundaryOutcome {
    /// Velocity inferred before any clamp was applied.
    pub velocity: DVec2,
    pub touched_floor: bool,
    pub touched_wall: bool,
}

/// Keeps particles inside the viewport floor and side walls.
///
/// Bounces are purely positional: the reflected velocity is written into
/// `previous_position`. There is no ceiling.
#[derive(Debug, Clone)]
pub struct BoundaryHandler {
    pub radius: f64,
    pub floor_restitution: f64,
    pub floor_friction: f64,
    pub wall_restitution: f64,
    pub rest_speed: f64,
    pub rest_gravity: f64,
    parallel: bool,
}

impl Default for BoundaryHandler {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl BoundaryHandler {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            floor_restitution: DEFAULT_FLOOR_RESTITUTION,
            floor_friction: DEFAULT_FLOOR_FRICTION,
            wall_restitution: DEFAULT_WALL_RESTITUTION,
            rest_speed: DEFAULT_REST_SPEED,
            rest_gravity: DEFAULT_REST_GRAVITY,
            parallel: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            radius: config.radius,
            floor_restitution: config.floor_restitution,
            floor_friction: config.floor_friction,
            wall_restitution: config.wall_restitution,
            rest_speed: config.rest_speed,
            rest_gravity: config.rest_gravity,
            parallel: false,
        }
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    /// Clamps one particle and reflects its velocity on contact.
    pub fn apply(
        &self,
        particle: &mut Particle,
        viewport: Viewport,
        gravity: f64,
    ) -> BoundaryOutcome {
        let velocity = particle.velocity();
        let mut outcome = BoundaryOutcome {
            velocity,
            ..BoundaryOutcome::default()
        };

        let floor = viewport.floor(self.radius);
        if particle.position.y > floor {
            particle.position.y = floor;
            particle.previous_position.y = floor + velocity.y * self.floor_restitution;
            particle.previous_position.x = particle.position.x - velocity.x * self.floor_friction;

            // Low gravity cannot pull a tiny bounce back down; stop it instead.
            if velocity.y.abs() < self.rest_speed && gravity < self.rest_gravity {
                particle.previous_position.y = particle.position.y;
            }
            outcome.touched_floor = true;
        }

        let right = viewport.right_wall(self.radius);
        if particle.position.x > right {
            particle.position.x = right;
            particle.previous_position.x = right + velocity.x * self.wall_restitution;
            outcome.touched_wall = true;
        }

        if particle.position.x < self.radius {
            particle.position.x = self.radius;
            particle.previous_position.x = self.radius + velocity.x * self.wall_restitution;
            outcome.touched_wall = true;
        }

        outcome
    }

    /// Applies [`Self::apply`] to every particle, writing one outcome per particle into `outcomes`.
    pub fn apply_all(
        &self,
        particles: &mut [Particle],
        viewport: Viewport,
        gravity: f64,
        outcomes: &mut Vec<BoundaryOutcome>,
    ) {
        outcomes.clear();
        if self.parallel {
            self.apply_all_parallel(particles, viewport, gravity, outcomes);
            return;
        }
        outcomes.extend(
            particles
                .iter_mut()
                .map(|particle| self.apply(particle, viewport, gravity)),
        );
    }

    #[cfg(feature = "parallel")]
    fn apply_all_parallel(
        &self,
        particles: &mut [Particle],
        viewport: Viewport,
        gravity: f64,
        outcomes: &mut Vec<BoundaryOutcome>,
    ) {
        particles
            .par_iter_mut()
            .map(|particle| self.apply(particle, viewport, gravity))
            .collect_into_vec(outcomes);
    }

    #[cfg(not(feature = "parallel"))]
    fn apply_all_parallel(
        &self,
        particles: &mut [Particle],
        viewport: Viewport,
        gravity: f64,
        outcomes: &mut Vec<BoundaryOutcome>,
    ) {
        outcomes.extend(
            particles
                .iter_mut()
                .map(|particle| self.apply(particle, viewport, gravity)),
        );
    }
}
