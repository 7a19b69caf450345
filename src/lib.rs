//! Particle Hash Engine - uniform-grid particle collisions in WASM
//!
//! Each step: integrate -> hash -> bitonic sort -> cell bounds + reorder ->
//! collide. Stages run in parallel with Rayon when the `parallel` feature
//! is on.
//!
//! Layout:
//! - domain/      - Parameters and grid layout
//! - spatial/     - Hashing, sorting, cell table
//! - systems/     - Integrator and collision resolver
//! - simulation/  - Store, step pipeline, JS facade

pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Particle hash engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{GridParams, SimulationParams, EMPTY_CELL};
pub use simulation::{ParticleStore, ParticleSystem, PerfStats, RunSummary, SimulationCore};
