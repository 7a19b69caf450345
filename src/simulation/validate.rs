//! Pipeline invariant checks
//!
//! A failure here is a bug in a stage, not a runtime condition. The step
//! pipeline runs these in debug builds and panics with the message; tests
//! call them directly.

use glam::Vec4;

use crate::domain::EMPTY_CELL;
use crate::spatial::CellTable;

/// Every hash addresses a real cell.
pub fn check_hashes_in_range(hashes: &[u32], cell_count: u32) -> Result<(), String> {
    match hashes.iter().position(|&h| h >= cell_count) {
        Some(i) => Err(format!("hash {} at {} outside {} cells", hashes[i], i, cell_count)),
        None => Ok(()),
    }
}

/// `indices` holds each of `0..indices.len()` exactly once.
pub fn check_permutation(indices: &[u32]) -> Result<(), String> {
    let mut seen = vec![false; indices.len()];
    for (p, &i) in indices.iter().enumerate() {
        let slot = seen
            .get_mut(i as usize)
            .ok_or_else(|| format!("index {} at {} out of range", i, p))?;
        if *slot {
            return Err(format!("index {} duplicated at {}", i, p));
        }
        *slot = true;
    }
    Ok(())
}

/// Non-decreasing order.
pub fn check_sorted(hashes: &[u32]) -> Result<(), String> {
    match hashes.windows(2).position(|w| w[0] > w[1]) {
        Some(p) => Err(format!(
            "hashes out of order at {}: {} > {}",
            p,
            hashes[p],
            hashes[p + 1]
        )),
        None => Ok(()),
    }
}

/// Cell ranges are disjoint, cover `0..n` exactly, and agree with the sorted
/// hashes. Empty cells carry the sentinel in both arrays.
pub fn check_cell_table(cells: &CellTable, sorted_hashes: &[u32]) -> Result<(), String> {
    let n = sorted_hashes.len();
    let mut covered = 0usize;

    for cell in 0..cells.len() {
        let (start, end) = (cells.starts()[cell], cells.ends()[cell]);
        if start == EMPTY_CELL {
            if end != EMPTY_CELL {
                return Err(format!("empty cell {} has end {}", cell, end));
            }
            continue;
        }
        let (start, end) = (start as usize, end as usize);
        if start >= end || end > n {
            return Err(format!("cell {} has bad range {}..{}", cell, start, end));
        }
        if sorted_hashes[start..end].iter().any(|&h| h as usize != cell) {
            return Err(format!("cell {} range {}..{} holds foreign hashes", cell, start, end));
        }
        if start > 0 && sorted_hashes[start - 1] as usize == cell {
            return Err(format!("cell {} starts late at {}", cell, start));
        }
        if end < n && sorted_hashes[end] as usize == cell {
            return Err(format!("cell {} ends early at {}", cell, end));
        }
        covered += end - start;
    }

    if covered != n {
        return Err(format!("cell ranges cover {} of {} particles", covered, n));
    }
    Ok(())
}

/// `sorted[p] == source[indices[p]]` for every p.
pub fn check_gather(sorted: &[Vec4], source: &[Vec4], indices: &[u32]) -> Result<(), String> {
    for (p, (&value, &i)) in sorted.iter().zip(indices).enumerate() {
        if source.get(i as usize) != Some(&value) {
            return Err(format!("sorted slot {} does not match particle {}", p, i));
        }
    }
    Ok(())
}

/// No NaN or infinity.
pub fn check_finite(label: &str, values: &[Vec4]) -> Result<(), String> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(format!("{} {} is not finite: {:?}", label, i, values[i])),
        None => Ok(()),
    }
}
