use crate::{
    config::{
        DEFAULT_COLLISION_DAMPING, DEFAULT_RADIUS, DEFAULT_RELAXATION_PASSES, SimulationConfig,
    },
    core::particle::Particle,
};

/// Counters gathered while relaxing contacts for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RelaxationMetrics {
    pub passes: u32,
    pub pairs_tested: usize,
    pub contacts_resolved: usize,
    pub coincident_pairs: usize,
    pub deepest_overlap: f64,
}

impl RelaxationMetrics {
    pub fn merge(&mut self, other: &Self) {
        self.passes += other.passes;
        self.pairs_tested += other.pairs_tested;
        self.contacts_resolved += other.contacts_resolved;
        self.coincident_pairs += other.coincident_pairs;
        self.deepest_overlap = self.deepest_overlap.max(other.deepest_overlap);
    }
}

/// Pairwise circle contact solver using symmetric positional correction.
///
/// Each pass sweeps every unordered pair in index order, so a push applied to
/// one pair is visible to the pairs after it. A few passes settle chains of
/// overlapping particles without a global solve. The scan is O(n²) per pass;
/// a uniform grid broad-phase would be the next step for thousands of particles.
#[derive(Debug, Clone)]
pub struct CollisionSolver {
    pub radius: f64,
    pub passes: u32,
    pub damping: f64,
}

impl Default for CollisionSolver {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl CollisionSolver {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            passes: DEFAULT_RELAXATION_PASSES,
            damping: DEFAULT_COLLISION_DAMPING,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            radius: config.radius,
            passes: config.relaxation_passes,
            damping: config.collision_damping,
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Runs every relaxation pass over the collection.
    pub fn solve(&self, particles: &mut [Particle]) -> RelaxationMetrics {
        let mut metrics = RelaxationMetrics::default();
        for _ in 0..self.passes {
            metrics.merge(&self.relax(particles));
        }
        metrics
    }

    /// One sweep over all unordered pairs.
    pub fn relax(&self, particles: &mut [Particle]) -> RelaxationMetrics {
        let mut metrics = RelaxationMetrics {
            passes: 1,
            ..RelaxationMetrics::default()
        };

        let count = particles.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = pair_mut(particles, i, j);
                metrics.pairs_tested += 1;
                match self.resolve_pair(a, b) {
                    PairOutcome::Separate => {}
                    PairOutcome::Coincident => metrics.coincident_pairs += 1,
                    PairOutcome::Resolved { overlap } => {
                        metrics.contacts_resolved += 1;
                        metrics.deepest_overlap = metrics.deepest_overlap.max(overlap);
                    }
                }
            }
        }

        metrics
    }

    /// Pushes an overlapping pair apart along the line between their centres.
    pub fn resolve_pair(&self, a: &mut Particle, b: &mut Particle) -> PairOutcome {
        let delta = b.position - a.position;
        let dist = delta.length();

        // Coincident centres have no contact normal.
        if dist == 0.0 {
            return PairOutcome::Coincident;
        }

        let diameter = self.diameter();
        if dist >= diameter {
            return PairOutcome::Separate;
        }

        let overlap = diameter - dist;
        let normal = delta / dist;
        let push = normal * (overlap * 0.5);

        a.position -= push;
        b.position += push;

        self.bleed_velocity(a);
        self.bleed_velocity(b);

        PairOutcome::Resolved { overlap }
    }

    /// Re-anchors the previous snapshot so the corrected velocity is scaled by `damping`.
    fn bleed_velocity(&self, particle: &mut Particle) {
        particle.previous_position = particle.position
            + (particle.previous_position - particle.position) * self.damping;
    }
}

/// Result of testing a single pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    Separate,
    Coincident,
    Resolved { overlap: f64 },
}

fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (left, right) = particles.split_at_mut(j);
    (&mut left[i], &mut right[0])
}
