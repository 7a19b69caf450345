//! Spatial Hasher - position -> grid cell -> scalar cell hash
//!
//! Linearization is x-fastest: `z * dimY * dimX + y * dimX + x`.
//! Cell coordinates use `floor`, so a point exactly on a cell face belongs to
//! the higher cell; points past the last face are clamped into the edge cell.

use glam::{IVec3, UVec3, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::GridParams;

/// Unclamped integer cell coordinates of a world-space position.
#[inline(always)]
pub fn grid_pos(position: Vec4, grid: &GridParams) -> IVec3 {
    ((position.truncate() - grid.origin()) / grid.cell_size())
        .floor()
        .as_ivec3()
}

/// Hash of a cell, clamping each axis into the grid first.
#[inline(always)]
pub fn grid_hash(cell: IVec3, grid: &GridParams) -> u32 {
    let dims = grid.dims();
    let clamped = cell.clamp(IVec3::ZERO, dims.as_ivec3() - IVec3::ONE).as_uvec3();
    (clamped.z * dims.y + clamped.y) * dims.x + clamped.x
}

/// Inverse of [`grid_hash`] for in-range hashes.
#[inline(always)]
pub fn grid_unhash(hash: u32, grid: &GridParams) -> UVec3 {
    debug_assert!(hash < grid.cell_count(), "hash {} outside grid", hash);
    let dims = grid.dims();
    let x = hash % dims.x;
    let yz = hash / dims.x;
    UVec3::new(x, yz % dims.y, yz / dims.y)
}

/// Write each particle's cell hash and its own index.
pub fn calc_hash(hashes: &mut [u32], indices: &mut [u32], positions: &[Vec4], grid: &GridParams) {
    debug_assert_eq!(hashes.len(), positions.len());
    debug_assert_eq!(indices.len(), positions.len());

    #[cfg(feature = "parallel")]
    {
        hashes
            .par_iter_mut()
            .zip(indices.par_iter_mut())
            .zip(positions.par_iter())
            .enumerate()
            .for_each(|(i, ((hash, index), &pos))| {
                *hash = grid_hash(grid_pos(pos, grid), grid);
                *index = i as u32;
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, ((hash, index), &pos)) in hashes
            .iter_mut()
            .zip(indices.iter_mut())
            .zip(positions.iter())
            .enumerate()
        {
            *hash = grid_hash(grid_pos(pos, grid), grid);
            *index = i as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SimulationParams;
    use glam::Vec3;

    fn small_grid() -> GridParams {
        SimulationParams {
            grid_size: UVec3::new(4, 5, 6),
            cell_size: Some(0.5),
            ..SimulationParams::default()
        }
        .grid_params()
        .unwrap()
    }

    #[test]
    fn floor_puts_cell_faces_in_the_upper_cell() {
        let grid = small_grid();
        assert_eq!(grid_pos(Vec4::new(-0.5, -1.0, -1.0, 1.0), &grid), IVec3::new(1, 0, 0));
        assert_eq!(grid_pos(Vec4::new(-0.5001, -1.0, -1.0, 1.0), &grid), IVec3::new(0, 0, 0));
    }

    #[test]
    fn negative_offsets_floor_downwards() {
        let grid = small_grid();
        assert_eq!(grid_pos(Vec4::new(-1.2, -1.0, -1.0, 1.0), &grid).x, -1);
    }

    #[test]
    fn hash_clamps_out_of_range_cells() {
        let grid = small_grid();
        assert_eq!(grid_hash(IVec3::new(-3, -1, -7), &grid), 0);
        assert_eq!(grid_hash(IVec3::new(99, 99, 99), &grid), grid.cell_count() - 1);
    }

    #[test]
    fn hash_is_x_fastest() {
        let grid = small_grid();
        assert_eq!(grid_hash(IVec3::new(1, 0, 0), &grid), 1);
        assert_eq!(grid_hash(IVec3::new(0, 1, 0), &grid), 4);
        assert_eq!(grid_hash(IVec3::new(0, 0, 1), &grid), 20);
    }

    #[test]
    fn unhash_inverts_every_cell() {
        let grid = small_grid();
        for hash in 0..grid.cell_count() {
            let cell = grid_unhash(hash, &grid);
            assert_eq!(grid_hash(cell.as_ivec3(), &grid), hash);
        }
    }

    #[test]
    fn calc_hash_writes_identity_indices() {
        let grid = small_grid();
        let positions = vec![
            Vec3::new(0.9, 0.9, 0.9).extend(1.0),
            Vec3::new(-0.9, -0.9, -0.9).extend(1.0),
            Vec3::new(-0.4, 0.1, 0.6).extend(1.0),
        ];
        let mut hashes = vec![0u32; 3];
        let mut indices = vec![99u32; 3];
        calc_hash(&mut hashes, &mut indices, &positions, &grid);

        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(hashes[1], 0);
        // (0.9 + 1) / 0.5 = 3.8 -> 3 on every axis
        assert_eq!(hashes[0], grid_hash(IVec3::splat(3), &grid));
        assert_eq!(hashes[2], grid_hash(IVec3::new(1, 2, 3), &grid));
    }
}
