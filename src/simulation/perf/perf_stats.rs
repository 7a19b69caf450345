use wasm_bindgen::prelude::*;

/// Snapshot of the last step. All zeros while perf metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) hash_ms: f64,
    pub(super) sort_ms: f64,
    pub(super) reorder_ms: f64,
    pub(super) collide_ms: f64,
    pub(super) validate_ms: f64,

    pub(super) particle_count: u32,
    pub(super) cell_count: u32,
    pub(super) occupied_cells: u32,
    pub(super) max_cell_occupancy: u32,
    pub(super) pair_contacts: u32,
    pub(super) collider_contacts: u32,
    pub(super) sort_passes: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

/// Counters clamp at `u32::MAX` instead of wrapping.
pub(crate) fn saturate_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn hash_ms(&self) -> f64 { self.hash_ms }
    #[wasm_bindgen(getter)]
    pub fn sort_ms(&self) -> f64 { self.sort_ms }
    #[wasm_bindgen(getter)]
    pub fn reorder_ms(&self) -> f64 { self.reorder_ms }
    #[wasm_bindgen(getter)]
    pub fn collide_ms(&self) -> f64 { self.collide_ms }
    #[wasm_bindgen(getter)]
    pub fn validate_ms(&self) -> f64 { self.validate_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> u32 { self.cell_count }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn max_cell_occupancy(&self) -> u32 { self.max_cell_occupancy }
    #[wasm_bindgen(getter)]
    pub fn pair_contacts(&self) -> u32 { self.pair_contacts }
    #[wasm_bindgen(getter)]
    pub fn collider_contacts(&self) -> u32 { self.collider_contacts }
    #[wasm_bindgen(getter)]
    pub fn sort_passes(&self) -> u32 { self.sort_passes }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_byte_counts_saturate() {
        assert_eq!(saturate_u32(1234), 1234);
        assert_eq!(saturate_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(saturate_u32(5 << 30), u32::MAX);
    }
}
