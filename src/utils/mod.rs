//! Utility helpers: trace spans, frame budget warnings, and per-phase profiling.

pub mod logging;
pub mod profiling;

pub use logging::{ScopedTimer, warn_if_frame_budget_exceeded};
pub use profiling::{FrameProfiler, PhaseTimer};
