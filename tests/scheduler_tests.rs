use std::collections::HashMap;

use verlet_sandbox::*;

/// Host double that hands out tokens and forwards events to live listeners.
#[derive(Default)]
struct MockHost {
    next_id: u64,
    pending: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
    listeners: HashMap<ListenerToken, (HostListener, ControlHandle)>,
}

impl MockHost {
    fn click(&self, x: f64, y: f64) {
        for (kind, sink) in self.listeners.values() {
            if *kind == HostListener::Click {
                sink.click(x, y);
            }
        }
    }

    fn resize(&self, width: f64, height: f64) {
        for (kind, sink) in self.listeners.values() {
            if *kind == HostListener::Resize {
                sink.resize(width, height);
            }
        }
    }

    /// Fires the most recently requested frame, like one vsync.
    fn vsync(&mut self, scheduler: &mut FrameScheduler, surface: &mut PixelBuffer) -> bool {
        match self.pending.pop() {
            Some(token) => scheduler.on_frame(self, token, surface),
            None => false,
        }
    }
}

impl FrameHost for MockHost {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|pending| *pending != token);
        self.cancelled.push(token);
    }

    fn add_listener(&mut self, listener: HostListener, sink: ControlHandle) -> ListenerToken {
        self.next_id += 1;
        let token = ListenerToken(self.next_id);
        self.listeners.insert(token, (listener, sink));
        token
    }

    fn remove_listener(&mut self, token: ListenerToken) {
        self.listeners.remove(&token);
    }
}

fn make_scheduler() -> FrameScheduler {
    let world = ParticleWorld::new(SimulationConfig::seeded(21), Viewport::new(400.0, 300.0))
        .expect("default config is valid");
    FrameScheduler::new(world)
}

#[test]
fn start_registers_listeners_and_one_frame() {
    let mut host = MockHost::default();
    let mut scheduler = make_scheduler();

    scheduler.start(&mut host);

    assert_eq!(host.pending.len(), 1);
    assert_eq!(host.listeners.len(), 2);
    assert_eq!(scheduler.state(), SchedulerState::Running);
}

#[test]
fn each_frame_schedules_exactly_one_successor() {
    let mut host = MockHost::default();
    let mut surface = PixelBuffer::new(400, 300);
    let mut scheduler = make_scheduler();
    scheduler.start(&mut host);

    for _ in 0..30 {
        assert!(host.vsync(&mut scheduler, &mut surface));
        assert_eq!(host.pending.len(), 1);
    }
    assert_eq!(scheduler.world().frame_count(), 30);
}

#[test]
fn stop_leaves_no_scheduled_work() {
    let mut host = MockHost::default();
    let mut surface = PixelBuffer::new(400, 300);
    let mut scheduler = make_scheduler();
    scheduler.start(&mut host);
    host.vsync(&mut scheduler, &mut surface);
    let outstanding = scheduler.pending_frame().expect("next frame requested");

    scheduler.stop(&mut host);

    assert!(host.pending.is_empty());
    assert!(host.listeners.is_empty());
    assert_eq!(host.cancelled, vec![outstanding]);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert_eq!(scheduler.pending_frame(), None);

    // A late callback for the cancelled token does nothing.
    assert!(!scheduler.on_frame(&mut host, outstanding, &mut surface));
    assert_eq!(scheduler.world().frame_count(), 1);

    // Stopping twice is harmless.
    scheduler.stop(&mut host);
    assert_eq!(host.cancelled.len(), 1);
}

#[test]
fn clicks_spawn_on_the_next_tick_only_while_listening() {
    let mut host = MockHost::default();
    let mut surface = PixelBuffer::new(400, 300);
    let mut scheduler = make_scheduler();
    scheduler.start(&mut host);

    host.click(100.0, 50.0);
    assert_eq!(scheduler.world().len(), 40);
    host.vsync(&mut scheduler, &mut surface);
    assert_eq!(scheduler.world().len(), 41);

    scheduler.stop(&mut host);
    host.click(10.0, 10.0);
    assert_eq!(scheduler.controls().pending_events(), 0);
    assert_eq!(scheduler.world().len(), 41);
}

#[test]
fn resize_and_gravity_apply_at_the_top_of_the_tick() {
    let mut host = MockHost::default();
    let mut surface = PixelBuffer::new(400, 300);
    let mut scheduler = make_scheduler();
    let controls = scheduler.controls();
    scheduler.start(&mut host);

    host.resize(800.0, 600.0);
    controls.set_gravity(1.0);
    host.vsync(&mut scheduler, &mut surface);

    assert_eq!(scheduler.world().viewport(), Viewport::new(800.0, 600.0));
    assert_eq!(surface.size(), (800, 600));
    assert_eq!(scheduler.world().gravity(), 1.0);
}

#[test]
fn restart_after_stop_resumes_ticking() {
    let mut host = MockHost::default();
    let mut surface = PixelBuffer::new(400, 300);
    let mut scheduler = make_scheduler();

    scheduler.start(&mut host);
    host.vsync(&mut scheduler, &mut surface);
    scheduler.stop(&mut host);

    scheduler.start(&mut host);
    assert!(scheduler.is_running());
    assert_eq!(host.listeners.len(), 2);
    assert!(host.vsync(&mut scheduler, &mut surface));
    assert_eq!(scheduler.world().frame_count(), 2);
}

#[test]
fn second_start_is_ignored() {
    let mut host = MockHost::default();
    let mut scheduler = make_scheduler();
    scheduler.start(&mut host);
    scheduler.start(&mut host);
    assert_eq!(host.pending.len(), 1);
    assert_eq!(host.listeners.len(), 2);
}
