//! Domain types: run parameters and the grid derived from them.

pub mod grid_params;
pub mod params;

pub use grid_params::{GridParams, EMPTY_CELL};
pub use params::{SimulationParams, WORLD_HALF_EXTENT};
