use glam::Vec4;

use crate::spatial::{BitonicSorter, CellTable};

/// Per-step scratch, sized once from the particle and cell counts and
/// overwritten every step.
pub(crate) struct StepArena {
    pub(crate) hashes: Vec<u32>,
    pub(crate) indices: Vec<u32>,
    pub(crate) sorted_hashes: Vec<u32>,
    pub(crate) sorted_indices: Vec<u32>,
    pub(crate) sorter: BitonicSorter,
    pub(crate) cells: CellTable,
    pub(crate) sorted_positions: Vec<Vec4>,
    pub(crate) sorted_velocities: Vec<Vec4>,
    pub(crate) velocity_scratch: Vec<Vec4>,
}

impl StepArena {
    pub(crate) fn new(particles: usize, cells: usize) -> Self {
        StepArena {
            hashes: vec![0; particles],
            indices: vec![0; particles],
            sorted_hashes: vec![0; particles],
            sorted_indices: vec![0; particles],
            sorter: BitonicSorter::new(particles),
            cells: CellTable::new(cells),
            sorted_positions: vec![Vec4::ZERO; particles],
            sorted_velocities: vec![Vec4::ZERO; particles],
            velocity_scratch: vec![Vec4::ZERO; particles],
        }
    }

    /// Rough footprint of every buffer, for perf stats.
    pub(crate) fn byte_len(&self) -> usize {
        let u32s = self.hashes.len() * 4 + self.cells.len() * 2 + self.sorter.padded_len() * 2;
        let vec4s = self.sorted_positions.len() * 3;
        u32s * std::mem::size_of::<u32>() + vec4s * std::mem::size_of::<Vec4>()
    }
}
