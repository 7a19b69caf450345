//! Spatial hashing pipeline: cell hashes, key/value sort, cell bounds.

pub mod cells;
pub mod hash;
pub mod sort;

pub use cells::{find_cell_bounds_and_reorder, CellTable, SortedParticles};
pub use hash::{calc_hash, grid_hash, grid_pos, grid_unhash};
pub use sort::{BitonicNetwork, BitonicPass, BitonicSorter};
