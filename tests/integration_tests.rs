use approx::assert_abs_diff_eq;
use verlet_sandbox::*;

fn empty_world(gravity: f64, viewport: Viewport) -> ParticleWorld {
    let config = SimulationConfig {
        gravity,
        initial_particles: 0,
        seed: Some(7),
        ..SimulationConfig::default()
    };
    ParticleWorld::new(config, viewport).expect("config should be valid")
}

#[test]
fn free_particle_bleeds_energy_every_frame() {
    let mut world = empty_world(0.0, Viewport::new(100_000.0, 100_000.0));
    let id = world.add_particle(Particle::new(
        DVec2::new(50_000.0, 50_000.0),
        DVec2::new(3.0, 4.0),
    ));

    let mut previous_speed = world.particle(id).unwrap().speed();
    for frame in 0..8_000 {
        world.step();
        let speed = world.particle(id).unwrap().speed();
        assert!(
            speed < previous_speed,
            "speed rose from {previous_speed} to {speed} at frame {frame}"
        );
        previous_speed = speed;
    }
    assert!(previous_speed < 0.01, "speed still {previous_speed}");
}

#[test]
fn velocity_entering_a_step_never_exceeds_max_speed() {
    let integrator = Integrator::new(1.0);
    let mut particle = Particle::at_rest(DVec2::ZERO);

    for force in [1.0e3, -5.0e5, 2.0e6] {
        particle.apply_force(DVec2::new(force, -force));
        integrator.integrate(&mut particle);
        integrator.integrate(&mut particle);

        let v = particle.velocity();
        assert!(v.x.abs() <= 35.0 + 1e-9, "vx = {}", v.x);
        assert!(v.y.abs() <= 35.0 + 1e-9, "vy = {}", v.y);
    }
}

#[test]
fn overlapping_pair_is_pushed_toward_contact_distance() {
    let solver = CollisionSolver::new(7.0);
    let mut particles = vec![
        Particle::at_rest(DVec2::new(200.0, 200.0)),
        Particle::at_rest(DVec2::new(205.0, 206.0)),
    ];
    let before = particles[0].position.distance(particles[1].position);

    solver.solve(&mut particles);

    let after = particles[0].position.distance(particles[1].position);
    assert!((after - 14.0).abs() < (before - 14.0).abs());
    assert!(particles.iter().all(Particle::is_finite));
}

#[test]
fn coincident_particles_pass_through_untouched() {
    let solver = CollisionSolver::new(7.0);
    let mut particles = vec![
        Particle::new(DVec2::new(42.0, 42.0), DVec2::new(1.0, 0.0)),
        Particle::new(DVec2::new(42.0, 42.0), DVec2::new(-1.0, 0.0)),
    ];
    let snapshot = particles.clone();

    let metrics = solver.solve(&mut particles);

    assert_eq!(particles, snapshot);
    assert_eq!(metrics.coincident_pairs, 3);
}

#[test]
fn dropped_particle_settles_on_the_floor() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut world = empty_world(0.35, viewport);
    let id = world.add_particle(Particle::at_rest(DVec2::new(400.0, 100.0)));
    let floor = viewport.floor(7.0);

    for _ in 0..600 {
        world.step();
        assert!(world.particle(id).unwrap().position.y <= floor);
    }
    for _ in 0..20 {
        world.step();
        assert_eq!(world.particle(id).unwrap().position.y, floor);
    }
}

#[test]
fn low_gravity_floor_contact_comes_to_rest() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut world = empty_world(0.03, viewport);
    let id = world.add_particle(Particle::at_rest(DVec2::new(400.0, viewport.floor(7.0))));

    for _ in 0..50 {
        world.step();
        let particle = world.particle(id).unwrap();
        assert_eq!(particle.position.y, 593.0);
        assert_eq!(particle.velocity().y, 0.0);
    }
}

#[test]
fn wall_clamps_and_reverses_horizontal_velocity() {
    let mut world = empty_world(0.0, Viewport::new(800.0, 600.0));
    let mut particle = Particle::at_rest(DVec2::new(795.0, 300.0));
    particle.set_velocity(DVec2::new(4.0, 0.0));
    assert_eq!(particle.previous_position, DVec2::new(791.0, 300.0));
    let id = world.add_particle(particle);

    world.step();

    let particle = world.particle(id).unwrap();
    assert_eq!(particle.position.x, 793.0);
    let incoming = 4.0 * 0.999;
    assert_abs_diff_eq!(particle.velocity().x, -0.7 * incoming, epsilon = 1e-9);
    assert!(world.boundary_outcomes()[0].touched_wall);
}

#[test]
fn spawn_appends_one_particle_at_the_click() {
    let mut world = ParticleWorld::new(SimulationConfig::seeded(3), Viewport::new(800.0, 600.0))
        .expect("default config is valid");
    assert_eq!(world.len(), 40);

    let id = world.spawn(DVec2::new(123.0, 45.0));

    assert_eq!(world.len(), 41);
    assert_eq!(id.index(), 40);
    let particle = world.particle(id).unwrap();
    assert_eq!(particle.position, DVec2::new(123.0, 45.0));
    let v = particle.velocity();
    assert!(v.x.abs() <= 2.0 + 1e-9 && v.y.abs() <= 2.0 + 1e-9);

    let mut count = world.len();
    for _ in 0..100 {
        world.step();
        assert!(world.len() >= count);
        count = world.len();
    }
}

#[test]
fn busy_world_stays_finite_and_inside_the_box() {
    let viewport = Viewport::new(400.0, 300.0);
    let config = SimulationConfig {
        initial_particles: 100,
        seed: Some(99),
        ..SimulationConfig::default()
    };
    let mut world = ParticleWorld::new(config, viewport).unwrap();

    for _ in 0..500 {
        world.step();
    }

    for particle in world.particles() {
        assert!(particle.is_finite());
        assert!(particle.position.y <= viewport.floor(7.0));
        assert!(particle.position.x >= 7.0 && particle.position.x <= viewport.right_wall(7.0));
    }
}

#[test]
fn parallel_and_sequential_steps_agree() {
    let viewport = Viewport::new(640.0, 480.0);
    let mut sequential = ParticleWorld::new(SimulationConfig::seeded(17), viewport).unwrap();
    let mut parallel = ParticleWorld::new(SimulationConfig::seeded(17), viewport).unwrap();
    parallel.set_parallel_enabled(true);
    assert!(parallel.parallel_enabled());

    for _ in 0..120 {
        sequential.step();
        parallel.step();
    }

    assert_eq!(sequential.particles(), parallel.particles());
}
