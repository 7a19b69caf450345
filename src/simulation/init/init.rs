use super::arena::StepArena;
use super::lattice::init_lattice;
use super::perf_stats::PerfStats;
use super::store::ParticleStore;
use super::SimulationCore;
use super::validate::check_finite;
use crate::domain::SimulationParams;

pub(super) fn create_simulation_core(params: SimulationParams) -> Result<SimulationCore, String> {
    let mut store = ParticleStore::new(params.num_particles as usize);
    seed_lattice(&mut store, &params);
    create_simulation_core_with_store(params, store)
}

pub(super) fn create_simulation_core_with_store(
    params: SimulationParams,
    store: ParticleStore,
) -> Result<SimulationCore, String> {
    let grid = params.grid_params()?;
    if store.len() != params.num_particles as usize {
        return Err(format!(
            "store holds {} particles but numParticles is {}",
            store.len(),
            params.num_particles
        ));
    }
    check_finite("position", store.positions())?;
    check_finite("velocity", store.velocities())?;

    let dims = grid.dims();
    log::info!(
        "simulation: {} particles, grid {} x {} x {} = {} cells",
        store.len(),
        dims.x,
        dims.y,
        dims.z,
        grid.cell_count()
    );

    Ok(SimulationCore {
        arena: StepArena::new(store.len(), grid.cell_count() as usize),
        params,
        grid,
        store,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

pub(super) fn reset(sim: &mut SimulationCore) {
    seed_lattice(&mut sim.store, &sim.params);
    sim.frame = 0;
    sim.perf_stats.reset();
    log::debug!("simulation reset to initial lattice");
}

fn seed_lattice(store: &mut ParticleStore, params: &SimulationParams) {
    let radius = params.particle_radius;
    let (positions, velocities) = store.split_mut();
    init_lattice(positions, velocities, radius, radius * 2.0, params.seed);
}
