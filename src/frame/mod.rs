//! Frame scheduling: the host-driven tick loop and its input controls.

pub mod controls;
pub mod scheduler;

pub use controls::{ControlHandle, FrameInput, GravitySlider, HostEvent};
pub use scheduler::{
    FrameHost, FrameScheduler, FrameToken, HostListener, ListenerToken, SchedulerState,
};
