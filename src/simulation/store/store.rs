//! Particle Store - canonical position/velocity arrays in original slot order
//!
//! Each particle is a pair of 16-byte `Vec4`s: position `(x, y, z, 1)` and
//! velocity `(x, y, z, 0)`. Flat `f32` views (4 floats per particle) are
//! handed to JS and to anything expecting the packed layout.

use glam::Vec4;

pub struct ParticleStore {
    positions: Vec<Vec4>,
    velocities: Vec<Vec4>,
}

impl ParticleStore {
    /// `count` particles at the origin, at rest.
    pub fn new(count: usize) -> Self {
        ParticleStore {
            positions: vec![Vec4::new(0.0, 0.0, 0.0, 1.0); count],
            velocities: vec![Vec4::ZERO; count],
        }
    }

    pub fn from_parts(positions: Vec<Vec4>, velocities: Vec<Vec4>) -> Result<Self, String> {
        if positions.len() != velocities.len() {
            return Err(format!(
                "position/velocity count mismatch: {} vs {}",
                positions.len(),
                velocities.len()
            ));
        }
        Ok(ParticleStore { positions, velocities })
    }

    /// Build from packed `[x, y, z, w]` float buffers.
    pub fn from_flat(positions: &[f32], velocities: &[f32]) -> Result<Self, String> {
        if positions.len() % 4 != 0 || velocities.len() % 4 != 0 {
            return Err("flat particle buffers must hold 4 floats per particle".to_string());
        }
        Self::from_parts(
            positions.chunks_exact(4).map(Vec4::from_slice).collect(),
            velocities.chunks_exact(4).map(Vec4::from_slice).collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize { self.positions.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    #[inline]
    pub fn positions(&self) -> &[Vec4] { &self.positions }

    #[inline]
    pub fn velocities(&self) -> &[Vec4] { &self.velocities }

    #[inline]
    pub fn velocities_mut(&mut self) -> &mut [Vec4] { &mut self.velocities }

    /// Both arrays mutably, for stages that update them together.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [Vec4], &mut [Vec4]) {
        (&mut self.positions, &mut self.velocities)
    }

    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn velocities_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.velocities)
    }

    pub fn set(&mut self, index: usize, position: Vec4, velocity: Vec4) {
        self.positions[index] = position;
        self.velocities[index] = velocity;
    }

    /// Bytes held by both arrays.
    pub fn byte_len(&self) -> usize {
        (self.positions.len() + self.velocities.len()) * std::mem::size_of::<Vec4>()
    }
}
