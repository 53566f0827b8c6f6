use std::time::Instant;

use glam::DVec2;
use log::{debug, info, warn};

use crate::{
    core::types::Viewport,
    render::{renderer::Renderer, surface::Surface},
    utils::logging::{ScopedTimer, warn_if_frame_budget_exceeded},
    world::{FramePhase, ParticleWorld},
};

use super::controls::{ControlHandle, HostEvent};

/// Handle for one pending refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Handle for one registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(pub u64);

/// Host events the scheduler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostListener {
    Resize,
    Click,
}

/// Refresh scheduling and event registration offered by the host (window, canvas, ...).
pub trait FrameHost {
    /// Schedules one call to [`FrameScheduler::on_frame`] at the next display refresh.
    fn request_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);

    /// Routes events of `listener` kind into `sink` until removed.
    fn add_listener(&mut self, listener: HostListener, sink: ControlHandle) -> ListenerToken;

    fn remove_listener(&mut self, token: ListenerToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Drives the world one tick per host refresh and owns its teardown.
pub struct FrameScheduler {
    world: ParticleWorld,
    renderer: Renderer,
    controls: ControlHandle,
    state: SchedulerState,
    pending_frame: Option<FrameToken>,
    listeners: Vec<ListenerToken>,
    frame_budget_ms: f32,
    slow_frames: u64,
}

impl FrameScheduler {
    pub fn new(world: ParticleWorld) -> Self {
        let controls = ControlHandle::new(world.gravity());
        Self::with_controls(world, controls)
    }

    pub fn with_controls(world: ParticleWorld, controls: ControlHandle) -> Self {
        let renderer = Renderer::from_config(world.config());
        let frame_budget_ms = world.config().frame_budget_ms;
        Self {
            world,
            renderer,
            controls,
            state: SchedulerState::Idle,
            pending_frame: None,
            listeners: Vec::new(),
            frame_budget_ms,
            slow_frames: 0,
        }
    }

    /// Handle for feeding gravity, clicks and resizes from any thread.
    pub fn controls(&self) -> ControlHandle {
        self.controls.clone()
    }

    pub fn world(&self) -> &ParticleWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut ParticleWorld {
        &mut self.world
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }

    /// Subscribes to host events and requests the first frame.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_running() {
            warn!("frame scheduler already running");
            return;
        }

        for listener in [HostListener::Resize, HostListener::Click] {
            let token = host.add_listener(listener, self.controls.clone());
            self.listeners.push(token);
        }
        self.pending_frame = Some(host.request_frame());
        self.state = SchedulerState::Running;
        info!(
            "frame scheduler started with {} particles, gravity {:.2}",
            self.world.len(),
            self.world.gravity()
        );
    }

    /// Host refresh callback. Runs one tick and schedules the next.
    ///
    /// Returns `false` for callbacks that are stale or arrive after `stop`.
    pub fn on_frame<H, S>(&mut self, host: &mut H, token: FrameToken, surface: &mut S) -> bool
    where
        H: FrameHost + ?Sized,
        S: Surface + ?Sized,
    {
        if !self.is_running() || self.pending_frame != Some(token) {
            debug!("ignoring stale frame callback {token:?}");
            return false;
        }

        self.pending_frame = None;
        self.tick(surface);
        self.pending_frame = Some(host.request_frame());
        true
    }

    /// Cancels the pending frame and removes every listener. Safe to call repeatedly.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.pending_frame.take() {
            host.cancel_frame(token);
        }
        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }
        self.controls.clear();

        if self.state == SchedulerState::Running {
            info!(
                "frame scheduler stopped after {} frames",
                self.world.frame_count()
            );
        }
        if self.state != SchedulerState::Idle {
            self.state = SchedulerState::Stopped;
        }
    }

    /// One full frame: controls, physics, then drawing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let frame_start = Instant::now();

        let input = {
            let _span = ScopedTimer::new(FramePhase::ReadControls, self.world.frame_count());
            self.controls.take_frame_input()
        };
        self.world.set_gravity(input.gravity);
        for event in input.events {
            self.apply_event(event, surface);
        }

        self.world.step();

        let render_start = Instant::now();
        {
            let _span = ScopedTimer::new(FramePhase::Render, self.world.frame_count());
            self.renderer.render(surface, &self.world);
        }
        let render_time = render_start.elapsed();

        let total = frame_start.elapsed();
        let profiler = self.world.profiler_mut();
        profiler.render_time = render_time;
        profiler.total_frame_time = total;
        profiler.report();

        if warn_if_frame_budget_exceeded(total, self.frame_budget_ms) {
            self.slow_frames += 1;
        }
    }

    fn apply_event<S: Surface + ?Sized>(&mut self, event: HostEvent, surface: &mut S) {
        match event {
            HostEvent::Click { x, y } => {
                self.world.spawn(DVec2::new(x, y));
            }
            HostEvent::Resize { width, height } => {
                if !Viewport::new(width, height).is_valid() {
                    warn!("dropping invalid resize event {width}x{height}");
                    return;
                }
                self.world.resize(width, height);
                surface.resize(width.round() as u32, height.round() as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimulationConfig, render::pixel_buffer::PixelBuffer};

    #[derive(Default)]
    struct CountingHost {
        next: u64,
        requested: Vec<FrameToken>,
        cancelled: Vec<FrameToken>,
        listeners: Vec<ListenerToken>,
    }

    impl FrameHost for CountingHost {
        fn request_frame(&mut self) -> FrameToken {
            self.next += 1;
            let token = FrameToken(self.next);
            self.requested.push(token);
            token
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.cancelled.push(token);
        }

        fn add_listener(&mut self, _listener: HostListener, _sink: ControlHandle) -> ListenerToken {
            self.next += 1;
            let token = ListenerToken(self.next);
            self.listeners.push(token);
            token
        }

        fn remove_listener(&mut self, token: ListenerToken) {
            self.listeners.retain(|t| *t != token);
        }
    }

    fn scheduler() -> FrameScheduler {
        let world =
            ParticleWorld::new(SimulationConfig::seeded(11), Viewport::new(320.0, 240.0)).unwrap();
        FrameScheduler::new(world)
    }

    #[test]
    fn lifecycle_moves_idle_running_stopped() {
        let mut host = CountingHost::default();
        let mut surface = PixelBuffer::new(320, 240);
        let mut scheduler = scheduler();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        scheduler.start(&mut host);
        assert!(scheduler.is_running());
        assert_eq!(scheduler.listener_count(), 2);

        let first = scheduler.pending_frame().unwrap();
        assert!(scheduler.on_frame(&mut host, first, &mut surface));
        assert_eq!(scheduler.world().frame_count(), 1);

        scheduler.stop(&mut host);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert!(host.listeners.is_empty());
        assert_eq!(host.cancelled.len(), 1);
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut host = CountingHost::default();
        let mut surface = PixelBuffer::new(320, 240);
        let mut scheduler = scheduler();
        scheduler.start(&mut host);

        assert!(!scheduler.on_frame(&mut host, FrameToken(999), &mut surface));
        assert_eq!(scheduler.world().frame_count(), 0);
    }

    #[test]
    fn resize_event_resizes_world_and_surface() {
        let mut surface = PixelBuffer::new(320, 240);
        let mut scheduler = scheduler();
        scheduler.controls().resize(640.0, 480.0);
        scheduler.controls().resize(-1.0, 480.0);

        scheduler.tick(&mut surface);

        assert_eq!(scheduler.world().viewport(), Viewport::new(640.0, 480.0));
        assert_eq!(surface.size(), (640, 480));
    }
}
