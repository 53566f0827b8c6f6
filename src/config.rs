//! Global configuration constants and the tunable [`SimulationConfig`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Number of particles created when the simulation starts.
pub const DEFAULT_INITIAL_PARTICLES: usize = 40;

/// Collision and render radius shared by every particle.
pub const DEFAULT_RADIUS: f64 = 7.0;

/// Default downward acceleration (Y-down, surface coordinates).
pub const DEFAULT_GRAVITY: f64 = 0.35;

/// Lower bound of the gravity slider.
pub const GRAVITY_MIN: f64 = 0.0;

/// Upper bound of the gravity slider.
pub const GRAVITY_MAX: f64 = 1.2;

/// Granularity of the gravity slider.
pub const GRAVITY_STEP: f64 = 0.05;

/// Integration timestep, one unit per displayed frame.
pub const DEFAULT_TIME_STEP: f64 = 1.0;

/// Fraction of velocity retained each step (air friction).
pub const DEFAULT_AIR_FRICTION: f64 = 0.999;

/// Per-axis cap on the velocity inherited by an integration step.
pub const DEFAULT_MAX_SPEED: f64 = 35.0;

/// Relaxation passes performed by the collision solver per frame.
pub const DEFAULT_RELAXATION_PASSES: u32 = 3;

/// Scale applied to velocity after a positional collision correction.
pub const DEFAULT_COLLISION_DAMPING: f64 = 0.98;

/// Vertical restitution on floor contact.
pub const DEFAULT_FLOOR_RESTITUTION: f64 = 0.6;

/// Horizontal velocity retained on floor contact.
pub const DEFAULT_FLOOR_FRICTION: f64 = 0.85;

/// Horizontal restitution on wall contact.
pub const DEFAULT_WALL_RESTITUTION: f64 = 0.7;

/// Vertical speed below which a floor contact may come to rest.
pub const DEFAULT_REST_SPEED: f64 = 0.1;

/// Gravity below which resting floor contacts freeze vertically.
pub const DEFAULT_REST_GRAVITY: f64 = 0.05;

/// Opacity of the black overlay that produces motion trails.
pub const DEFAULT_TRAIL_ALPHA: f32 = 0.25;

/// Hue (degrees) used for every particle.
pub const DEFAULT_HUE: f64 = 200.0;

/// Lightness (percent) of a particle at rest.
pub const DEFAULT_LIGHTNESS_BASE: f64 = 55.0;

/// Lightness (percent) gained per unit of speed.
pub const DEFAULT_LIGHTNESS_GAIN: f64 = 4.0;

/// Half-width of the random initial velocity range per axis.
pub const DEFAULT_SPAWN_JITTER: f64 = 2.0;

/// Frame budget (ms) used for slow-frame warnings, ~60 Hz.
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 1000.0 / 60.0;

/// Every tunable of the simulation in one serialisable bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_particles: usize,
    pub radius: f64,
    pub gravity: f64,
    pub time_step: f64,
    pub air_friction: f64,
    pub max_speed: f64,
    pub relaxation_passes: u32,
    pub collision_damping: f64,
    pub floor_restitution: f64,
    pub floor_friction: f64,
    pub wall_restitution: f64,
    pub rest_speed: f64,
    pub rest_gravity: f64,
    pub spawn_jitter: f64,
    pub trail_alpha: f32,
    pub hue: f64,
    pub lightness_base: f64,
    pub lightness_gain: f64,
    pub frame_budget_ms: f32,
    /// Seed for particle placement and jitter; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_particles: DEFAULT_INITIAL_PARTICLES,
            radius: DEFAULT_RADIUS,
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            air_friction: DEFAULT_AIR_FRICTION,
            max_speed: DEFAULT_MAX_SPEED,
            relaxation_passes: DEFAULT_RELAXATION_PASSES,
            collision_damping: DEFAULT_COLLISION_DAMPING,
            floor_restitution: DEFAULT_FLOOR_RESTITUTION,
            floor_friction: DEFAULT_FLOOR_FRICTION,
            wall_restitution: DEFAULT_WALL_RESTITUTION,
            rest_speed: DEFAULT_REST_SPEED,
            rest_gravity: DEFAULT_REST_GRAVITY,
            spawn_jitter: DEFAULT_SPAWN_JITTER,
            trail_alpha: DEFAULT_TRAIL_ALPHA,
            hue: DEFAULT_HUE,
            lightness_base: DEFAULT_LIGHTNESS_BASE,
            lightness_gain: DEFAULT_LIGHTNESS_GAIN,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Same defaults with a fixed RNG seed, handy for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Checks that every field is usable. Gravity is only required to be finite.
    pub fn validate(&self) -> Result<()> {
        positive("radius", self.radius)?;
        positive("time_step", self.time_step)?;
        positive("max_speed", self.max_speed)?;
        unit_interval("air_friction", self.air_friction)?;
        unit_interval("collision_damping", self.collision_damping)?;
        unit_interval("floor_restitution", self.floor_restitution)?;
        unit_interval("floor_friction", self.floor_friction)?;
        unit_interval("wall_restitution", self.wall_restitution)?;
        non_negative("rest_speed", self.rest_speed)?;
        non_negative("rest_gravity", self.rest_gravity)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;
        non_negative("lightness_gain", self.lightness_gain)?;

        if !self.gravity.is_finite() {
            return Err(SimError::config("gravity", "must be finite"));
        }
        if self.relaxation_passes == 0 {
            return Err(SimError::config(
                "relaxation_passes",
                "at least one pass is required",
            ));
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(SimError::config("trail_alpha", "must lie in [0, 1]"));
        }
        if !(0.0..=100.0).contains(&self.lightness_base) {
            return Err(SimError::config("lightness_base", "must lie in [0, 100]"));
        }
        if !self.hue.is_finite() {
            return Err(SimError::config("hue", "must be finite"));
        }
        if !self.frame_budget_ms.is_finite() || self.frame_budget_ms <= 0.0 {
            return Err(SimError::config("frame_budget_ms", "must be positive"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::config(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::config(
            field,
            format!("must be non-negative, got {value}"),
        ))
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::config(field, format!("must lie in [0, 1], got {value}")))
    }
}
