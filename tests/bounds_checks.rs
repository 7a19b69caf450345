//! Bad caller-supplied indices must panic, in release builds too.

use glam::Vec4;
use particle_hash_engine::spatial::{find_cell_bounds_and_reorder, CellTable};

#[test]
#[should_panic]
fn cell_range_far_outside_table_panics() {
    let cells = CellTable::new(2);
    let _ = cells.range(50_000_000);
}

#[test]
#[should_panic]
fn reorder_with_foreign_index_panics() {
    let src = [Vec4::ONE, Vec4::ONE];
    let mut cells = CellTable::new(1);
    let mut sorted_pos = [Vec4::ZERO];
    let mut sorted_vel = [Vec4::ZERO];
    find_cell_bounds_and_reorder(
        &mut cells,
        &mut sorted_pos,
        &mut sorted_vel,
        &[0],
        &[3],
        &src[1..],
        &src[1..],
    );
}

#[test]
fn in_range_lookups_still_work() {
    let src = [Vec4::new(0.5, 0.0, 0.0, 1.0)];
    let mut cells = CellTable::new(4);
    let mut sorted_pos = [Vec4::ZERO];
    let mut sorted_vel = [Vec4::ZERO];
    let occupied =
        find_cell_bounds_and_reorder(&mut cells, &mut sorted_pos, &mut sorted_vel, &[3], &[0], &src, &src);
    assert_eq!(occupied, 1);
    assert_eq!(cells.range(3), Some(0..1));
    assert_eq!(cells.range(0), None);
    assert_eq!(sorted_pos[0], src[0]);
}
