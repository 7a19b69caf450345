use glam::{IVec3, UVec3, Vec3};

/// Cell table marker for "no particles in this cell".
pub const EMPTY_CELL: u32 = u32::MAX;

/// Uniform grid layout, fixed for the lifetime of a simulation.
///
/// Built only through [`crate::domain::SimulationParams::grid_params`], which
/// guarantees `cell_count < EMPTY_CELL` so no real hash collides with the
/// sentinel or with the sorter's padding key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    origin: Vec3,
    cell_size: Vec3,
    dims: UVec3,
    cell_count: u32,
}

impl GridParams {
    pub(crate) fn new(origin: Vec3, cell_size: Vec3, dims: UVec3) -> Result<Self, String> {
        if dims.x == 0 || dims.y == 0 || dims.z == 0 {
            return Err(format!("grid dimensions must be non-zero: {:?}", dims.to_array()));
        }
        if dims.max_element() > i32::MAX as u32 {
            return Err(format!("grid axis too long for signed cell coordinates: {:?}", dims.to_array()));
        }
        let cells = dims.x as u64 * dims.y as u64 * dims.z as u64;
        if cells >= EMPTY_CELL as u64 {
            return Err(format!("grid has too many cells for u32 hashes: {}", cells));
        }
        if !origin.is_finite() {
            return Err("world origin must be finite".to_string());
        }
        if !cell_size.is_finite() || cell_size.min_element() <= 0.0 {
            return Err(format!("cell size must be positive: {:?}", cell_size.to_array()));
        }

        Ok(Self {
            origin,
            cell_size,
            dims,
            cell_count: cells as u32,
        })
    }

    #[inline]
    pub fn origin(&self) -> Vec3 { self.origin }

    #[inline]
    pub fn cell_size(&self) -> Vec3 { self.cell_size }

    #[inline]
    pub fn dims(&self) -> UVec3 { self.dims }

    #[inline]
    pub fn cell_count(&self) -> u32 { self.cell_count }

    /// True when `cell` addresses a real cell (no clamping applied).
    #[inline]
    pub fn contains_cell(&self, cell: IVec3) -> bool {
        cell.cmpge(IVec3::ZERO).all() && cell.cmplt(self.dims.as_ivec3()).all()
    }
}
