//! Contact handling: particle-particle relaxation and viewport boundaries.

pub mod boundary;
pub mod solver;

pub use boundary::{BoundaryHandler, BoundaryOutcome};
pub use solver::{CollisionSolver, PairOutcome, RelaxationMetrics};
