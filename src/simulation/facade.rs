use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::SimulationCore;
use crate::domain::SimulationParams;

#[wasm_bindgen]
pub struct ParticleSystem {
    core: SimulationCore,
}

#[wasm_bindgen]
impl ParticleSystem {
    /// Create a system of `num_particles` with default parameters
    #[wasm_bindgen(constructor)]
    pub fn new(num_particles: u32) -> Result<ParticleSystem, JsValue> {
        let core = SimulationCore::new(SimulationParams::with_particles(num_particles))
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    /// Create from a (possibly partial) camelCase JSON parameter document
    #[wasm_bindgen(js_name = fromParamsJson)]
    pub fn from_params_json(json: String) -> Result<ParticleSystem, JsValue> {
        let core = SimulationCore::from_params_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() }

    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> u32 { self.core.cell_count() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Step the simulation forward by one timestep
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Step `iterations` times. Returns the run summary as JSON.
    pub fn run(&mut self, iterations: u32) -> String {
        self.core.run(iterations).to_json()
    }

    /// Back to the initial lattice, frame 0
    pub fn reset(&mut self) {
        self.core.reset();
    }

    pub fn params_json(&self) -> String {
        self.core.params().to_json()
    }

    /// Get pointer to packed xyzw positions (for JS rendering)
    pub fn positions_ptr(&self) -> *const f32 {
        self.core.positions_ptr()
    }

    /// Get pointer to packed xyzw velocities
    pub fn velocities_ptr(&self) -> *const f32 {
        self.core.velocities_ptr()
    }

    pub fn positions_len_elements(&self) -> usize {
        self.core.buffer_len_elements()
    }

    pub fn positions_len_bytes(&self) -> usize {
        self.core.buffer_len_bytes()
    }

    pub fn velocities_len_elements(&self) -> usize {
        self.core.buffer_len_elements()
    }

    pub fn velocities_len_bytes(&self) -> usize {
        self.core.buffer_len_bytes()
    }
}

impl ParticleSystem {
    /// Native access to the wrapped simulation
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }
}
