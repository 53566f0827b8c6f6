//! Verlet Sandbox – an interactive 2D particle toy.
//!
//! Circular particles fall under a live-tunable gravity, push each other apart
//! through positional relaxation, bounce off the viewport floor and walls, and
//! are drawn as speed-coloured discs over a fading trail. The host (window,
//! canvas, slider) plugs in through [`FrameHost`], [`Surface`] and
//! [`ControlHandle`].

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod frame;
pub mod render;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use collision::{
    boundary::{BoundaryHandler, BoundaryOutcome},
    solver::{CollisionSolver, PairOutcome, RelaxationMetrics},
};
pub use config::SimulationConfig;
pub use crate::core::{
    particle::{Particle, ParticleId},
    types::Viewport,
};
pub use dynamics::{
    forces::{ForceGenerator, GravityForce},
    integrator::Integrator,
};
pub use error::SimError;
pub use frame::{
    controls::{ControlHandle, FrameInput, GravitySlider, HostEvent},
    scheduler::{
        FrameHost, FrameScheduler, FrameToken, HostListener, ListenerToken, SchedulerState,
    },
};
pub use render::{
    color::{Hsl, SpeedPalette},
    pixel_buffer::PixelBuffer,
    renderer::Renderer,
    surface::{Rgba, Surface},
};
pub use utils::profiling::FrameProfiler;
pub use world::{FramePhase, ParticleWorld};
