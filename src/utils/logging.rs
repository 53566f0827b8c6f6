use log::{Level, log_enabled, trace, warn};
use std::time::{Duration, Instant};

use crate::world::FramePhase;

/// Trace span covering one [`FramePhase`] of a numbered frame.
///
/// Logs the phase label and frame number on entry and the elapsed microseconds
/// on drop. Both messages are skipped unless trace logging is enabled.
pub struct ScopedTimer {
    phase: FramePhase,
    frame: u64,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(phase: FramePhase, frame: u64) -> Self {
        if log_enabled!(Level::Trace) {
            trace!("frame {frame}: enter {}", phase.label());
        }
        Self {
            phase,
            frame,
            start: Instant::now(),
        }
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            trace!(
                "frame {}: {} took {} µs",
                self.frame,
                self.phase.label(),
                self.start.elapsed().as_micros()
            );
        }
    }
}

/// Warns when a tick overruns its frame budget. Returns whether it did.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Frame exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
