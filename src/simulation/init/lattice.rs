//! Initializer - jittered cubic lattice
//!
//! Particles fill a `side^3` lattice from the `(-1, -1, -1)` corner, x fastest,
//! one slot per particle until N is reached. Each coordinate gets a small
//! uniform jitter so no two particles start perfectly aligned.

use glam::{Vec3, Vec4};

use super::random::{frand, seed_state};
use crate::domain::WORLD_HALF_EXTENT;

/// Jitter amplitude as a fraction of the particle radius.
const JITTER_FRACTION: f32 = 0.01;

/// Smallest `s` with `s^3 >= n`.
pub(crate) fn lattice_side(n: usize) -> usize {
    let mut side = (n as f64).cbrt().round() as usize;
    while side * side * side < n {
        side += 1;
    }
    while side > 1 && (side - 1) * (side - 1) * (side - 1) >= n {
        side -= 1;
    }
    side
}

/// Fill `positions`/`velocities` with a lattice of the given spacing.
/// Deterministic for a fixed `seed`.
pub fn init_lattice(positions: &mut [Vec4], velocities: &mut [Vec4], radius: f32, spacing: f32, seed: u32) {
    debug_assert_eq!(positions.len(), velocities.len());
    let n = positions.len();
    if n == 0 {
        return;
    }

    let side = lattice_side(n);
    let jitter = radius * JITTER_FRACTION;
    let corner = Vec3::splat(radius - WORLD_HALF_EXTENT);
    let mut rng = seed_state(seed);

    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let i = (z * side + y) * side + x;
                if i >= n {
                    continue;
                }
                let lattice = Vec3::new(x as f32, y as f32, z as f32) * spacing + corner;
                let offset = Vec3::new(
                    (frand(&mut rng) * 2.0 - 1.0) * jitter,
                    (frand(&mut rng) * 2.0 - 1.0) * jitter,
                    (frand(&mut rng) * 2.0 - 1.0) * jitter,
                );
                positions[i] = (lattice + offset).extend(1.0);
                velocities[i] = Vec4::ZERO;
            }
        }
    }
}
