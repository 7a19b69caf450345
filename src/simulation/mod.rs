//! Simulation - owns the particle store, parameters and per-step arena
//!
//! One `step()` runs the five stages in strict order:
//! integrate -> calc_hash -> sort -> find_cell_bounds_and_reorder -> collide.
//! Each stage borrows its inputs shared and its outputs exclusively, and the
//! parallel stages return only after every element is written.
//!
//! Stage code lives in `spatial/` and `systems/`; this module only wires the
//! buffers together.

use glam::Vec4;

use crate::domain::{GridParams, SimulationParams};
use crate::spatial::CellTable;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/lattice.rs"]
mod lattice;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "store/store.rs"]
mod store;
#[path = "store/arena.rs"]
mod arena;
#[path = "step/step.rs"]
mod step;
#[path = "step/run.rs"]
mod run;
mod facade;
pub mod validate;

pub use facade::ParticleSystem;
pub use lattice::init_lattice;
pub use perf_stats::PerfStats;
pub use run::RunSummary;
pub use store::ParticleStore;

use arena::StepArena;
use perf_timer::PerfTimer;

/// The simulation context
pub struct SimulationCore {
    params: SimulationParams,
    grid: GridParams,
    store: ParticleStore,
    arena: StepArena,

    // State
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Validate `params` and lay out `num_particles` on the jittered lattice.
    pub fn new(params: SimulationParams) -> Result<Self, String> {
        init::create_simulation_core(params)
    }

    /// Start from caller-provided particles instead of the lattice.
    /// `store.len()` must equal `params.num_particles`.
    pub fn with_store(params: SimulationParams, store: ParticleStore) -> Result<Self, String> {
        init::create_simulation_core_with_store(params, store)
    }

    /// Parse a JSON parameter document (see [`SimulationParams::from_json`]).
    pub fn from_params_json(json: &str) -> Result<Self, String> {
        Self::new(SimulationParams::from_json(json)?)
    }

    pub fn params(&self) -> &SimulationParams { &self.params }

    pub fn grid(&self) -> &GridParams { &self.grid }

    pub fn store(&self) -> &ParticleStore { &self.store }

    pub fn particle_count(&self) -> u32 { self.store.len() as u32 }

    pub fn cell_count(&self) -> u32 { self.grid.cell_count() }

    pub fn frame(&self) -> u64 { self.frame }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Step the simulation forward by one timestep
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Step `iterations` times and report wall time.
    pub fn run(&mut self, iterations: u32) -> RunSummary {
        run::run(self, iterations)
    }

    /// Put every particle back on the initial lattice and rewind the frame
    /// counter.
    pub fn reset(&mut self) {
        init::reset(self);
    }

    // === Last-step buffers (read-only) ===

    pub fn cell_table(&self) -> &CellTable { &self.arena.cells }

    pub fn sorted_hashes(&self) -> &[u32] { &self.arena.sorted_hashes }

    pub fn sorted_indices(&self) -> &[u32] { &self.arena.sorted_indices }

    pub fn sorted_positions(&self) -> &[Vec4] { &self.arena.sorted_positions }

    pub fn sorted_velocities(&self) -> &[Vec4] { &self.arena.sorted_velocities }

    /// Get pointer to packed positions (for JS rendering)
    pub fn positions_ptr(&self) -> *const f32 {
        self.store.positions_flat().as_ptr()
    }

    pub fn velocities_ptr(&self) -> *const f32 {
        self.store.velocities_flat().as_ptr()
    }

    /// Floats in each packed buffer (4 per particle).
    pub fn buffer_len_elements(&self) -> usize {
        self.store.positions_flat().len()
    }

    pub fn buffer_len_bytes(&self) -> usize {
        self.buffer_len_elements() * std::mem::size_of::<f32>()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
