use glam::DVec2;
use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    collision::{BoundaryHandler, BoundaryOutcome, CollisionSolver, RelaxationMetrics},
    config::SimulationConfig,
    core::{
        particle::{Particle, ParticleId},
        types::Viewport,
    },
    dynamics::{
        forces::{ForceGenerator, GravityForce},
        integrator::Integrator,
    },
    error::{Result, SimError},
    utils::{
        logging::ScopedTimer,
        profiling::{FrameProfiler, PhaseTimer},
    },
};

/// Ordered stages of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePhase {
    ReadControls,
    GravityApplication,
    Integration,
    CollisionResolution,
    BoundaryClamp,
    Render,
}

impl FramePhase {
    pub const ORDER: [FramePhase; 6] = [
        FramePhase::ReadControls,
        FramePhase::GravityApplication,
        FramePhase::Integration,
        FramePhase::CollisionResolution,
        FramePhase::BoundaryClamp,
        FramePhase::Render,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FramePhase::ReadControls => "controls::drain",
            FramePhase::GravityApplication => "forces::gravity",
            FramePhase::Integration => "integrator",
            FramePhase::CollisionResolution => "collisions::relax",
            FramePhase::BoundaryClamp => "boundaries::clamp",
            FramePhase::Render => "render",
        }
    }
}

/// Owns the particle collection and the live simulation parameters.
pub struct ParticleWorld {
    particles: Vec<Particle>,
    pub integrator: Integrator,
    pub solver: CollisionSolver,
    pub boundary: BoundaryHandler,
    config: SimulationConfig,
    gravity: f64,
    viewport: Viewport,
    rng: StdRng,
    outcomes: Vec<BoundaryOutcome>,
    last_relaxation: RelaxationMetrics,
    profiler: FrameProfiler,
    frame: u64,
    parallel_enabled: bool,
}

impl ParticleWorld {
    /// Builds a world and seeds it with `config.initial_particles` particles.
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Result<Self> {
        let mut world = Self::empty(config, viewport)?;
        world.populate(world.config.initial_particles);
        Ok(world)
    }

    /// Builds a world without the initial population.
    pub fn empty(config: SimulationConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        if !viewport.is_valid() {
            return Err(SimError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            particles: Vec::with_capacity(config.initial_particles),
            integrator: Integrator::from_config(&config),
            solver: CollisionSolver::from_config(&config),
            boundary: BoundaryHandler::from_config(&config),
            gravity: config.gravity,
            config,
            viewport,
            rng,
            outcomes: Vec::new(),
            last_relaxation: RelaxationMetrics::default(),
            profiler: FrameProfiler::default(),
            frame: 0,
            parallel_enabled: false,
        })
    }

    /// Adds `count` drifting particles scattered over the upper half of the viewport.
    pub fn populate(&mut self, count: usize) {
        let jitter = self.config.spawn_jitter;
        for _ in 0..count {
            let position = DVec2::new(
                self.rng.gen::<f64>() * self.viewport.width,
                self.rng.gen::<f64>() * (self.viewport.height * 0.5),
            );
            let particle = Particle::with_jitter(position, jitter, &mut self.rng);
            self.particles.push(particle);
        }
        debug!("populated {count} particles ({} total)", self.particles.len());
    }

    /// Appends one drifting particle at `position`, e.g. from a click.
    pub fn spawn(&mut self, position: DVec2) -> ParticleId {
        let particle = Particle::with_jitter(position, self.config.spawn_jitter, &mut self.rng);
        let id = self.add_particle(particle);
        debug!(
            "spawned particle {} at ({:.1}, {:.1})",
            id.index(),
            position.x,
            position.y
        );
        id
    }

    /// Appends a fully specified particle.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = ParticleId(self.particles.len());
        self.particles.push(particle);
        id
    }

    /// Updates the viewport. Negative or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            warn!("ignoring invalid resize to {width}x{height}");
            return;
        }
        debug!("viewport resized to {width}x{height}");
        self.viewport = viewport;
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
        self.integrator.set_parallel(enabled);
        self.boundary.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Per-particle results of the last boundary pass, in particle order.
    pub fn boundary_outcomes(&self) -> &[BoundaryOutcome] {
        &self.outcomes
    }

    /// Speed the boundary pass observed for a particle this frame.
    ///
    /// Falls back to the current snapshot difference for particles added since the last step.
    pub fn observed_speed(&self, index: usize) -> f64 {
        match self.outcomes.get(index) {
            Some(outcome) => outcome.velocity.length(),
            None => self
                .particles
                .get(index)
                .map(Particle::speed)
                .unwrap_or(0.0),
        }
    }

    pub fn last_relaxation(&self) -> &RelaxationMetrics {
        &self.last_relaxation
    }

    pub fn profiler(&self) -> &FrameProfiler {
        &self.profiler
    }

    pub fn profiler_mut(&mut self) -> &mut FrameProfiler {
        &mut self.profiler
    }

    /// Runs the physics half of a frame: gravity, integration, relaxation, boundaries.
    pub fn step(&mut self) {
        self.profiler.reset();
        self.profiler.particle_count = self.particles.len();
        let dt = self.integrator.dt;

        {
            let _span = ScopedTimer::new(FramePhase::GravityApplication, self.frame);
            let _timer = PhaseTimer::new(&mut self.profiler.forces_time);
            GravityForce::new(self.gravity).apply_all(&mut self.particles, dt);
        }
        {
            let _span = ScopedTimer::new(FramePhase::Integration, self.frame);
            let _timer = PhaseTimer::new(&mut self.profiler.integrator_time);
            self.integrator.step(&mut self.particles);
        }
        {
            let _span = ScopedTimer::new(FramePhase::CollisionResolution, self.frame);
            let _timer = PhaseTimer::new(&mut self.profiler.collision_time);
            self.last_relaxation = self.solver.solve(&mut self.particles);
        }
        {
            let _span = ScopedTimer::new(FramePhase::BoundaryClamp, self.frame);
            let _timer = PhaseTimer::new(&mut self.profiler.boundary_time);
            self.boundary.apply_all(
                &mut self.particles,
                self.viewport,
                self.gravity,
                &mut self.outcomes,
            );
        }

        self.profiler.contacts_resolved = self.last_relaxation.contacts_resolved;
        self.profiler.coincident_pairs = self.last_relaxation.coincident_pairs;
        self.profiler.floor_contacts = self.outcomes.iter().filter(|o| o.touched_floor).count();
        self.profiler.wall_contacts = self.outcomes.iter().filter(|o| o.touched_wall).count();
        self.profiler.total_frame_time = self.profiler.physics_time();
        self.frame += 1;
    }
}
