use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRAVITY, GRAVITY_MAX, GRAVITY_MIN, GRAVITY_STEP};

/// Input delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// Pointer click in surface coordinates; spawns a particle there.
    Click { x: f64, y: f64 },
    /// New drawable size.
    Resize { width: f64, height: f64 },
}

/// Everything a tick consumes from the controls, taken in one lock.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    pub gravity: f64,
    pub events: Vec<HostEvent>,
}

#[derive(Debug)]
struct ControlState {
    gravity: f64,
    pending: VecDeque<HostEvent>,
}

/// Cloneable, thread-safe handle through which hosts feed the simulation.
///
/// Writers may live on any thread. Nothing here touches particles: the frame
/// scheduler drains the handle at the top of each tick on the simulation thread.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    state: Arc<Mutex<ControlState>>,
}

impl Default for ControlHandle {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl ControlHandle {
    pub fn new(gravity: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControlState {
                gravity,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Stores a new gravity value; it takes effect at the next tick.
    pub fn set_gravity(&self, gravity: f64) {
        self.state.lock().gravity = gravity;
    }

    pub fn gravity(&self) -> f64 {
        self.state.lock().gravity
    }

    pub fn push(&self, event: HostEvent) {
        self.state.lock().pending.push_back(event);
    }

    pub fn click(&self, x: f64, y: f64) {
        self.push(HostEvent::Click { x, y });
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.push(HostEvent::Resize { width, height });
    }

    pub fn pending_events(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Reads gravity and drains queued events in FIFO order.
    pub fn take_frame_input(&self) -> FrameInput {
        let mut state = self.state.lock();
        FrameInput {
            gravity: state.gravity,
            events: state.pending.drain(..).collect(),
        }
    }

    /// Discards queued events without applying them.
    pub fn clear(&self) {
        self.state.lock().pending.clear();
    }
}

/// Range slider a host can use to drive gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravitySlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for GravitySlider {
    fn default() -> Self {
        Self {
            min: GRAVITY_MIN,
            max: GRAVITY_MAX,
            step: GRAVITY_STEP,
            default: DEFAULT_GRAVITY,
        }
    }
}

impl GravitySlider {
    /// Clamps to the slider range and rounds to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Text shown next to the slider, e.g. `Gravity: 0.35`.
    pub fn label(&self, value: f64) -> String {
        format!("Gravity: {value:.2}")
    }
}
