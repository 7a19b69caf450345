use crate::spatial::{calc_hash, find_cell_bounds_and_reorder, BitonicNetwork, SortedParticles};
use crate::systems::{collide, integrate};

use super::perf_stats::saturate_u32;
use super::{PerfTimer, SimulationCore};

pub(super) fn step(sim: &mut SimulationCore) {
    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
    }
    let step_start = perf_on.then(PerfTimer::start);

    let params = &sim.params;
    let grid = &sim.grid;
    let store = &mut sim.store;
    let arena = &mut sim.arena;
    let stats = &mut sim.perf_stats;

    // === 1. INTEGRATE ===
    PerfTimer::measure(perf_on, &mut stats.integrate_ms, || {
        let (positions, velocities) = store.split_mut();
        integrate(positions, velocities, params, params.timestep);
    });

    // === 2. HASH ===
    PerfTimer::measure(perf_on, &mut stats.hash_ms, || {
        calc_hash(&mut arena.hashes, &mut arena.indices, store.positions(), grid);
    });

    // === 3. SORT ===
    PerfTimer::measure(perf_on, &mut stats.sort_ms, || {
        arena.sorter.sort(
            &mut arena.sorted_hashes,
            &mut arena.sorted_indices,
            &arena.hashes,
            &arena.indices,
        );
    });

    // === 4. CELL BOUNDS + REORDER ===
    let occupied = PerfTimer::measure(perf_on, &mut stats.reorder_ms, || {
        find_cell_bounds_and_reorder(
            &mut arena.cells,
            &mut arena.sorted_positions,
            &mut arena.sorted_velocities,
            &arena.sorted_hashes,
            &arena.sorted_indices,
            store.positions(),
            store.velocities(),
        )
    });

    // === 5. COLLIDE (scatters back into original order) ===
    let contacts = PerfTimer::measure(perf_on, &mut stats.collide_ms, || {
        let sorted = SortedParticles {
            positions: &arena.sorted_positions,
            velocities: &arena.sorted_velocities,
            hashes: &arena.sorted_hashes,
            indices: &arena.sorted_indices,
        };
        collide(
            store.velocities_mut(),
            &mut arena.velocity_scratch,
            &sorted,
            &arena.cells,
            params,
            grid,
        )
    });

    #[cfg(debug_assertions)]
    {
        let frame = sim.frame;
        PerfTimer::measure(perf_on, &mut stats.validate_ms, || {
            if let Err(e) = check_step(grid.cell_count(), store, arena) {
                panic!("frame {}: {}", frame, e);
            }
        });
    }

    if perf_on {
        stats.particle_count = store.len() as u32;
        stats.cell_count = grid.cell_count();
        stats.occupied_cells = occupied;
        stats.pair_contacts = contacts.pair_contacts;
        stats.collider_contacts = contacts.collider_contacts;
        stats.sort_passes = BitonicNetwork::new(arena.sorter.padded_len()).pass_count() as u32;
        stats.memory_bytes = saturate_u32(store.byte_len() + arena.byte_len());
        // Full cell table scan (only when perf_enabled)
        stats.max_cell_occupancy = arena.cells.max_occupancy();
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }
    }

    sim.frame += 1;
}

/// Every pipeline invariant over the buffers of the step just taken.
#[cfg(debug_assertions)]
fn check_step(
    cell_count: u32,
    store: &super::ParticleStore,
    arena: &super::StepArena,
) -> Result<(), String> {
    use super::validate::*;

    check_hashes_in_range(&arena.hashes, cell_count)?;
    check_permutation(&arena.sorted_indices)?;
    check_sorted(&arena.sorted_hashes)?;
    check_cell_table(&arena.cells, &arena.sorted_hashes)?;
    check_gather(&arena.sorted_positions, store.positions(), &arena.sorted_indices)?;
    // Velocities were gathered before collide wrote the new ones.
    check_finite("position", store.positions())?;
    check_finite("velocity", store.velocities())?;
    Ok(())
}
