//! Cell-Bounds & Reorder
//!
//! After sorting, particles of one cell are contiguous. The cell table maps a
//! cell hash to its `[start, end)` range in sorted order, and the particle
//! attributes are gathered into that same order so the collision pass walks
//! memory linearly.

use glam::Vec4;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::EMPTY_CELL;

/// Per-cell `[start, end)` ranges into the sorted particle arrays.
/// Empty cells hold [`EMPTY_CELL`] in both arrays.
///
/// Only [`find_cell_bounds_and_reorder`] writes the table.
pub struct CellTable {
    start: Vec<u32>,
    end: Vec<u32>,
}

impl CellTable {
    pub fn new(cell_count: usize) -> Self {
        CellTable {
            start: vec![EMPTY_CELL; cell_count],
            end: vec![EMPTY_CELL; cell_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.start.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// Sorted-order range of `cell`, `None` when the cell is empty.
    /// Panics when `cell` is outside the table.
    #[inline(always)]
    pub fn range(&self, cell: usize) -> Option<std::ops::Range<usize>> {
        let start = self.start[cell];
        if start == EMPTY_CELL {
            return None;
        }
        Some(start as usize..self.end[cell] as usize)
    }

    /// Raw start of every cell (`EMPTY_CELL` when empty).
    pub fn starts(&self) -> &[u32] {
        &self.start
    }

    /// Raw end of every cell (`EMPTY_CELL` when empty).
    pub fn ends(&self) -> &[u32] {
        &self.end
    }

    /// Particles in the fullest cell.
    pub fn max_occupancy(&self) -> u32 {
        self.start
            .iter()
            .zip(&self.end)
            .filter(|&(&s, _)| s != EMPTY_CELL)
            .map(|(&s, &e)| e - s)
            .max()
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn set_raw(&mut self, cell: usize, start: u32, end: u32) {
        self.start[cell] = start;
        self.end[cell] = end;
    }

    /// Mark every cell empty.
    /// Parallel fill with Rayon when feature enabled
    pub fn reset(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.start.par_iter_mut().for_each(|v| *v = EMPTY_CELL);
            self.end.par_iter_mut().for_each(|v| *v = EMPTY_CELL);
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.start.fill(EMPTY_CELL);
            self.end.fill(EMPTY_CELL);
        }
    }
}

/// Read-only view of one step's sorted-order buffers.
#[derive(Clone, Copy)]
pub struct SortedParticles<'a> {
    pub positions: &'a [Vec4],
    pub velocities: &'a [Vec4],
    pub hashes: &'a [u32],
    /// Original slot of each sorted particle.
    pub indices: &'a [u32],
}

impl SortedParticles<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Build the cell table from sorted hashes and gather positions/velocities
/// into sorted order. Returns the number of occupied cells.
///
/// The boundary scan is a single O(n) pass; each cell's start/end is written
/// by exactly one run head/tail. The gather is a parallel map over `p`.
///
/// Panics when the slice lengths differ, a hash is outside `cells`, or an
/// index is outside `positions`.
pub fn find_cell_bounds_and_reorder(
    cells: &mut CellTable,
    sorted_positions: &mut [Vec4],
    sorted_velocities: &mut [Vec4],
    sorted_hashes: &[u32],
    sorted_indices: &[u32],
    positions: &[Vec4],
    velocities: &[Vec4],
) -> u32 {
    let n = sorted_hashes.len();
    assert_eq!(sorted_indices.len(), n, "reorder: index length mismatch");
    assert_eq!(sorted_positions.len(), n, "reorder: sorted position length mismatch");
    assert_eq!(sorted_velocities.len(), n, "reorder: sorted velocity length mismatch");
    assert_eq!(positions.len(), n, "reorder: position length mismatch");
    assert_eq!(velocities.len(), n, "reorder: velocity length mismatch");

    cells.reset();

    let mut occupied = 0u32;
    for p in 0..n {
        let hash = sorted_hashes[p];
        let cell = hash as usize;
        if p == 0 || sorted_hashes[p - 1] != hash {
            cells.start[cell] = p as u32;
            occupied += 1;
        }
        if p == n - 1 || sorted_hashes[p + 1] != hash {
            cells.end[cell] = p as u32 + 1;
        }
    }

    #[cfg(feature = "parallel")]
    {
        sorted_positions
            .par_iter_mut()
            .zip(sorted_velocities.par_iter_mut())
            .zip(sorted_indices.par_iter())
            .for_each(|((pos, vel), &orig)| {
                *pos = positions[orig as usize];
                *vel = velocities[orig as usize];
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((pos, vel), &orig) in sorted_positions
            .iter_mut()
            .zip(sorted_velocities.iter_mut())
            .zip(sorted_indices.iter())
        {
            *pos = positions[orig as usize];
            *vel = velocities[orig as usize];
        }
    }

    occupied
}
