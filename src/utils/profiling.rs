use log::{Level, debug, log_enabled};
use std::time::{Duration, Instant};

/// Timing and counters for the most recent frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameProfiler {
    pub forces_time: Duration,
    pub integrator_time: Duration,
    pub collision_time: Duration,
    pub boundary_time: Duration,
    pub render_time: Duration,
    pub total_frame_time: Duration,

    pub particle_count: usize,
    pub contacts_resolved: usize,
    pub coincident_pairs: usize,
    pub floor_contacts: usize,
    pub wall_contacts: usize,
}

impl FrameProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Time spent in the physics phases, excluding rendering.
    pub fn physics_time(&self) -> Duration {
        self.forces_time + self.integrator_time + self.collision_time + self.boundary_time
    }

    pub fn report(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        debug!(
            "frame: {} particles, {} contacts ({} coincident), {} floor / {} wall hits",
            self.particle_count,
            self.contacts_resolved,
            self.coincident_pairs,
            self.floor_contacts,
            self.wall_contacts
        );
        debug!(
            "  total {:.3} ms | forces {:.1}% | integrate {:.1}% | collide {:.1}% | bounds {:.1}% | render {:.1}%",
            self.total_frame_time.as_secs_f32() * 1000.0,
            share(self.forces_time, total_us),
            share(self.integrator_time, total_us),
            share(self.collision_time, total_us),
            share(self.boundary_time, total_us),
            share(self.render_time, total_us),
        );
    }
}

fn share(phase: Duration, total_us: f32) -> f32 {
    (phase.as_micros() as f32 / total_us) * 100.0
}

/// Adds the elapsed time to `output` when dropped.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
