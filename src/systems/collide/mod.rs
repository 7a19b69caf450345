//! Collision Resolver - neighbor search over the sorted cell grid
//!
//! Each particle scans its own cell and the 26 around it. Cells outside the
//! grid are skipped rather than clamped, so an edge cell is never scanned
//! twice. The summed contact force is applied directly as a velocity change.

use glam::{IVec3, Vec3, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::{GridParams, SimulationParams};
use crate::spatial::{grid_hash, grid_unhash, CellTable, SortedParticles};

mod contact;

pub use contact::{collide_spheres, Sphere, MIN_CONTACT_DISTANCE};

/// Contact counts from one collide pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollideStats {
    /// Overlapping particle pairs (each pair once).
    pub pair_contacts: u32,
    /// Particles touching the static collider.
    pub collider_contacts: u32,
}

/// Resolve contacts for every particle.
///
/// New velocities are computed in sorted order into `scratch`, then scattered
/// to `velocities[sorted.indices[p]]` so the store stays in original order.
/// Panics on mismatched lengths or an index/range outside the buffers.
pub fn collide(
    velocities: &mut [Vec4],
    scratch: &mut [Vec4],
    sorted: &SortedParticles<'_>,
    cells: &CellTable,
    params: &SimulationParams,
    grid: &GridParams,
) -> CollideStats {
    let n = sorted.len();
    assert_eq!(velocities.len(), n, "collide: velocity length mismatch");
    assert_eq!(scratch.len(), n, "collide: scratch length mismatch");
    assert_eq!(sorted.positions.len(), n, "collide: sorted position length mismatch");
    assert_eq!(sorted.velocities.len(), n, "collide: sorted velocity length mismatch");
    assert_eq!(sorted.hashes.len(), n, "collide: sorted hash length mismatch");

    #[cfg(feature = "parallel")]
    let (pair_hits, collider_hits) = scratch
        .par_iter_mut()
        .enumerate()
        .map(|(p, out)| {
            let (vel, stats) = particle_velocity(p, sorted, cells, params, grid);
            *out = vel;
            stats
        })
        .reduce(|| (0u32, 0u32), |a, b| (a.0 + b.0, a.1 + b.1));

    #[cfg(not(feature = "parallel"))]
    let (pair_hits, collider_hits) = {
        let mut totals = (0u32, 0u32);
        for (p, out) in scratch.iter_mut().enumerate() {
            let (vel, stats) = particle_velocity(p, sorted, cells, params, grid);
            *out = vel;
            totals.0 += stats.0;
            totals.1 += stats.1;
        }
        totals
    };

    for (p, &orig) in sorted.indices.iter().enumerate() {
        velocities[orig as usize] = scratch[p];
    }

    CollideStats {
        // Every pair was seen from both sides.
        pair_contacts: pair_hits / 2,
        collider_contacts: collider_hits,
    }
}

/// Updated velocity of sorted particle `p` plus (pair hits, collider hits).
#[inline(always)]
fn particle_velocity(
    p: usize,
    sorted: &SortedParticles<'_>,
    cells: &CellTable,
    params: &SimulationParams,
    grid: &GridParams,
) -> (Vec4, (u32, u32)) {
    let vel = sorted.velocities[p];
    let me = Sphere {
        pos: sorted.positions[p].truncate(),
        vel: vel.truncate(),
        radius: params.particle_radius,
    };
    let cell = grid_unhash(sorted.hashes[p], grid).as_ivec3();

    let mut force = Vec3::ZERO;
    let mut pair_hits = 0u32;

    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let neighbor = cell + IVec3::new(dx, dy, dz);
                if !grid.contains_cell(neighbor) {
                    continue;
                }
                let Some(range) = cells.range(grid_hash(neighbor, grid) as usize) else {
                    continue;
                };
                for q in range {
                    if q == p {
                        continue;
                    }
                    let other = Sphere {
                        pos: sorted.positions[q].truncate(),
                        vel: sorted.velocities[q].truncate(),
                        radius: params.particle_radius,
                    };
                    if let Some(f) = collide_spheres(me, other, params, params.attraction) {
                        force += f;
                        pair_hits += 1;
                    }
                }
            }
        }
    }

    let collider = Sphere {
        pos: params.collider_pos,
        vel: Vec3::ZERO,
        radius: params.collider_radius,
    };
    let mut collider_hits = 0u32;
    if let Some(f) = collide_spheres(me, collider, params, 0.0) {
        force += f;
        collider_hits = 1;
    }

    ((me.vel + force).extend(vel.w), (pair_hits, collider_hits))
}
