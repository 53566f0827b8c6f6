use verlet_sandbox::*;

/// Minimal host: one pending frame at a time and listeners that feed a control handle.
#[derive(Default)]
struct HeadlessHost {
    next_id: u64,
    pending: Option<FrameToken>,
    listeners: Vec<(ListenerToken, HostListener, ControlHandle)>,
}

impl HeadlessHost {
    fn click(&self, x: f64, y: f64) {
        for (_, kind, sink) in &self.listeners {
            if *kind == HostListener::Click {
                sink.click(x, y);
            }
        }
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }

    fn add_listener(&mut self, listener: HostListener, sink: ControlHandle) -> ListenerToken {
        self.next_id += 1;
        let token = ListenerToken(self.next_id);
        self.listeners.push((token, listener, sink));
        token
    }

    fn remove_listener(&mut self, token: ListenerToken) {
        self.listeners.retain(|(t, _, _)| *t != token);
    }
}

fn main() -> Result<(), SimError> {
    let viewport = Viewport::checked(800.0, 600.0)?;
    let world = ParticleWorld::new(SimulationConfig::seeded(2024), viewport)?;
    let mut scheduler = FrameScheduler::new(world);
    let mut surface = PixelBuffer::new(800, 600);
    let mut host = HeadlessHost::default();
    let slider = GravitySlider::default();

    scheduler.start(&mut host);
    for frame in 0..300 {
        if frame == 60 {
            host.click(400.0, 80.0);
        }
        if frame == 150 {
            scheduler.controls().set_gravity(slider.snap(0.8));
        }
        let Some(token) = host.pending.take() else {
            break;
        };
        scheduler.on_frame(&mut host, token, &mut surface);
    }
    scheduler.stop(&mut host);

    let world = scheduler.world();
    let resting = world
        .boundary_outcomes()
        .iter()
        .filter(|outcome| outcome.touched_floor)
        .count();
    println!("frames: {}", world.frame_count());
    println!("particles: {}", world.len());
    println!("{}", slider.label(world.gravity()));
    println!("on the floor: {resting}");
    println!(
        "contacts in last frame: {}",
        world.last_relaxation().contacts_resolved
    );
    println!("slow frames: {}", scheduler.slow_frames());
    Ok(())
}
