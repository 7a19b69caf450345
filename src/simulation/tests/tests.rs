use super::*;
use glam::Vec3;

fn quiet_params(num_particles: u32) -> SimulationParams {
    SimulationParams {
        num_particles,
        gravity: Vec3::ZERO,
        ..SimulationParams::default()
    }
}

fn particle(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

#[test]
fn step_advances_frame_and_keeps_every_particle() {
    let mut sim = SimulationCore::new(SimulationParams::with_particles(1000)).unwrap();
    assert_eq!(sim.frame(), 0);

    for _ in 0..3 {
        sim.step();
    }

    assert_eq!(sim.frame(), 3);
    assert_eq!(sim.particle_count(), 1000);
    validate::check_permutation(sim.sorted_indices()).unwrap();
    validate::check_sorted(sim.sorted_hashes()).unwrap();
    validate::check_cell_table(sim.cell_table(), sim.sorted_hashes()).unwrap();
    validate::check_finite("position", sim.store().positions()).unwrap();
    validate::check_finite("velocity", sim.store().velocities()).unwrap();
}

#[test]
fn perf_stats_stay_zero_until_enabled() {
    let mut sim = SimulationCore::new(SimulationParams::with_particles(64)).unwrap();
    sim.step();
    let stats = sim.get_perf_stats();
    assert_eq!(stats.particle_count(), 0);
    assert_eq!(stats.step_ms(), 0.0);

    sim.enable_perf_metrics(true);
    sim.step();
    let stats = sim.get_perf_stats();
    assert_eq!(stats.particle_count(), 64);
    assert_eq!(stats.cell_count(), 64 * 64 * 64);
    assert!(stats.occupied_cells() > 0);
    assert!(stats.max_cell_occupancy() >= 1);
    // 64 = 2^6 -> 6 * 7 / 2 passes
    assert_eq!(stats.sort_passes(), 21);
    assert!(stats.step_ms() >= 0.0);

    sim.enable_perf_metrics(false);
    assert_eq!(sim.get_perf_stats().particle_count(), 0);
}

#[test]
fn overlapping_pair_is_pushed_apart() {
    let store = ParticleStore::from_parts(
        vec![particle(0.0, 0.0, 0.0), particle(0.04, 0.0, 0.0)],
        vec![Vec4::ZERO; 2],
    )
    .unwrap();
    let mut sim = SimulationCore::with_store(quiet_params(2), store).unwrap();
    sim.enable_perf_metrics(true);
    sim.step();

    let v = sim.store().velocities();
    // spring * penetration = 0.5 * (0.046 - 0.04)
    assert!((v[0].x + 0.003).abs() < 1e-6, "left particle: {:?}", v[0]);
    assert!((v[1].x - 0.003).abs() < 1e-6, "right particle: {:?}", v[1]);
    assert_eq!(v[0].y, 0.0);
    assert_eq!(sim.get_perf_stats().pair_contacts(), 1);
    assert_eq!(sim.get_perf_stats().collider_contacts(), 0);
}

#[test]
fn isolated_particle_only_feels_gravity() {
    let store = ParticleStore::from_parts(vec![particle(0.0, 0.0, 0.0)], vec![Vec4::ZERO]).unwrap();
    let mut sim = SimulationCore::with_store(SimulationParams::with_particles(1), store).unwrap();
    sim.step();

    let pos = sim.store().positions()[0];
    let vel = sim.store().velocities()[0];
    assert!((vel.y + 0.00015).abs() < 1e-9);
    assert!((pos.y + 0.000075).abs() < 1e-9);
    assert_eq!(vel.x, 0.0);
    assert_eq!(vel.z, 0.0);
    assert_eq!(pos.w, 1.0);
}

#[test]
fn particle_inside_collider_is_pushed_out() {
    let params = SimulationParams {
        collider_pos: Vec3::ZERO,
        ..quiet_params(1)
    };
    let inside = Vec3::new(0.0, 0.1, 0.0);
    let store = ParticleStore::from_parts(vec![inside.extend(1.0)], vec![Vec4::ZERO]).unwrap();
    let mut sim = SimulationCore::with_store(params, store).unwrap();
    sim.enable_perf_metrics(true);
    sim.step();

    assert!(sim.store().velocities()[0].y > 0.0);
    assert_eq!(sim.get_perf_stats().collider_contacts(), 1);
}

#[test]
fn reset_restores_the_initial_lattice() {
    let mut sim = SimulationCore::new(SimulationParams::with_particles(512)).unwrap();
    let initial: Vec<Vec4> = sim.store().positions().to_vec();

    sim.run(5);
    assert_ne!(sim.store().positions(), &initial[..]);

    sim.reset();
    assert_eq!(sim.frame(), 0);
    assert_eq!(sim.store().positions(), &initial[..]);
    assert!(sim.store().velocities().iter().all(|v| *v == Vec4::ZERO));
}

#[test]
fn run_reports_iterations() {
    let mut sim = SimulationCore::new(SimulationParams::with_particles(128)).unwrap();
    let summary = sim.run(4);
    assert_eq!(summary.iterations, 4);
    assert_eq!(sim.frame(), 4);
    assert!(summary.total_ms >= 0.0);
    assert!(summary.to_json().contains("\"avgIterationUs\""));

    let empty = sim.run(0);
    assert_eq!(empty.avg_iteration_us, 0.0);
    assert_eq!(sim.frame(), 4);
}

#[test]
fn store_must_match_particle_count() {
    let store = ParticleStore::new(3);
    let err = SimulationCore::with_store(SimulationParams::with_particles(4), store)
        .err()
        .unwrap();
    assert!(err.contains("numParticles"));
}

#[test]
fn store_must_be_finite() {
    let store = ParticleStore::from_parts(
        vec![particle(0.0, f32::NAN, 0.0)],
        vec![Vec4::ZERO],
    )
    .unwrap();
    let err = SimulationCore::with_store(SimulationParams::with_particles(1), store)
        .err()
        .unwrap();
    assert!(err.starts_with("position 0"));

    let store = ParticleStore::from_parts(
        vec![particle(0.0, 0.0, 0.0)],
        vec![Vec4::new(f32::INFINITY, 0.0, 0.0, 0.0)],
    )
    .unwrap();
    let err = SimulationCore::with_store(SimulationParams::with_particles(1), store)
        .err()
        .unwrap();
    assert!(err.starts_with("velocity 0"));
}

#[test]
fn from_params_json_validates() {
    let sim = SimulationCore::from_params_json(r#"{ "numParticles": 10, "gridSize": [8, 8, 8] }"#).unwrap();
    assert_eq!(sim.particle_count(), 10);
    assert_eq!(sim.cell_count(), 512);

    assert!(SimulationCore::from_params_json(r#"{ "timestep": -1.0 }"#).is_err());
    assert!(SimulationCore::from_params_json("not json").is_err());
}

#[test]
fn packed_buffers_hold_four_floats_per_particle() {
    let sim = SimulationCore::new(SimulationParams::with_particles(100)).unwrap();
    assert_eq!(sim.buffer_len_elements(), 400);
    assert_eq!(sim.buffer_len_bytes(), 1600);
    assert!(!sim.positions_ptr().is_null());
    assert!(!sim.velocities_ptr().is_null());
}
