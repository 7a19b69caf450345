//! Simulation parameters
//!
//! Defaults reproduce the reference benchmark setup: 16384 particles of radius
//! 0.023 in a 64^3 grid whose cells are one particle diameter wide.
//! Any subset can be overridden from a camelCase JSON document.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use super::grid_params::GridParams;

/// Walls sit at +/- this value on every axis.
pub const WORLD_HALF_EXTENT: f32 = 1.0;

/// Keeps the padded sort length (next power of two) inside u32.
const MAX_PARTICLES: u32 = 1 << 30;

/// Physical constants and sizing for one run. Immutable once a simulation
/// has been built from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub num_particles: u32,
    pub grid_size: UVec3,
    pub world_origin: Vec3,
    /// Defaults to the particle diameter when `None`.
    pub cell_size: Option<f32>,
    pub particle_radius: f32,
    pub timestep: f32,

    pub gravity: Vec3,
    pub global_damping: f32,
    /// Velocity scale applied on wall contact; negative so the component flips.
    pub boundary_damping: f32,

    // Contact response
    pub spring: f32,
    pub damping: f32,
    pub shear: f32,
    pub attraction: f32,

    pub collider_pos: Vec3,
    pub collider_radius: f32,

    /// Seed for the lattice jitter.
    pub seed: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            num_particles: 16384,
            grid_size: UVec3::splat(64),
            world_origin: Vec3::splat(-WORLD_HALF_EXTENT),
            cell_size: None,
            particle_radius: 0.023,
            timestep: 0.5,
            gravity: Vec3::new(0.0, -0.0003, 0.0),
            global_damping: 1.0,
            boundary_damping: -0.5,
            spring: 0.5,
            damping: 0.02,
            shear: 0.1,
            attraction: 0.0,
            collider_pos: Vec3::new(1.2, -0.8, 0.8),
            collider_radius: 0.17,
            seed: 1973,
        }
    }
}

impl SimulationParams {
    /// Default parameters with a different particle count.
    pub fn with_particles(num_particles: u32) -> Self {
        SimulationParams {
            num_particles,
            ..SimulationParams::default()
        }
    }

    /// Parse a (possibly partial) JSON document on top of the defaults and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let bundle: ParamsBundle = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let params = bundle.apply(SimulationParams::default());
        params.grid_params()?;
        Ok(params)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Effective cell edge length.
    pub fn cell_size(&self) -> f32 {
        self.cell_size.unwrap_or(self.particle_radius * 2.0)
    }

    /// Validate every field and derive the grid layout.
    pub fn grid_params(&self) -> Result<GridParams, String> {
        if self.num_particles == 0 {
            return Err("numParticles must be at least 1".to_string());
        }
        if self.num_particles > MAX_PARTICLES {
            return Err(format!(
                "numParticles too large: {} (max {})",
                self.num_particles, MAX_PARTICLES
            ));
        }

        let radius = self.particle_radius;
        if !radius.is_finite() || radius <= 0.0 || radius >= WORLD_HALF_EXTENT {
            return Err(format!("particleRadius out of range: {}", radius));
        }

        // One neighbor ring only finds contacts when a cell spans a diameter.
        let cell_size = self.cell_size();
        if !cell_size.is_finite() || cell_size < radius * 2.0 {
            return Err(format!(
                "cellSize {} is smaller than the particle diameter {}",
                cell_size,
                radius * 2.0
            ));
        }

        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(format!("timestep must be positive: {}", self.timestep));
        }
        if !(-1.0..=0.0).contains(&self.boundary_damping) {
            return Err(format!(
                "boundaryDamping must lie in [-1, 0]: {}",
                self.boundary_damping
            ));
        }
        if !self.global_damping.is_finite() || self.global_damping < 0.0 {
            return Err(format!("globalDamping must be >= 0: {}", self.global_damping));
        }
        for (name, value) in [
            ("spring", self.spring),
            ("damping", self.damping),
            ("shear", self.shear),
            ("attraction", self.attraction),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite", name));
            }
        }
        if !self.gravity.is_finite() {
            return Err("gravity must be finite".to_string());
        }
        if !self.collider_pos.is_finite()
            || !self.collider_radius.is_finite()
            || self.collider_radius < 0.0
        {
            return Err("collider must have a finite position and non-negative radius".to_string());
        }

        GridParams::new(self.world_origin, Vec3::splat(cell_size), self.grid_size)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ParamsBundle {
    #[serde(default)]
    num_particles: Option<u32>,
    #[serde(default)]
    grid_size: Option<UVec3>,
    #[serde(default)]
    world_origin: Option<Vec3>,
    #[serde(default)]
    cell_size: Option<f32>,
    #[serde(default)]
    particle_radius: Option<f32>,
    #[serde(default)]
    timestep: Option<f32>,
    #[serde(default)]
    gravity: Option<Vec3>,
    #[serde(default)]
    global_damping: Option<f32>,
    #[serde(default)]
    boundary_damping: Option<f32>,
    #[serde(default)]
    spring: Option<f32>,
    #[serde(default)]
    damping: Option<f32>,
    #[serde(default)]
    shear: Option<f32>,
    #[serde(default)]
    attraction: Option<f32>,
    #[serde(default)]
    collider_pos: Option<Vec3>,
    #[serde(default)]
    collider_radius: Option<f32>,
    #[serde(default)]
    seed: Option<u32>,
}

impl ParamsBundle {
    fn apply(self, base: SimulationParams) -> SimulationParams {
        SimulationParams {
            num_particles: self.num_particles.unwrap_or(base.num_particles),
            grid_size: self.grid_size.unwrap_or(base.grid_size),
            world_origin: self.world_origin.unwrap_or(base.world_origin),
            cell_size: self.cell_size.or(base.cell_size),
            particle_radius: self.particle_radius.unwrap_or(base.particle_radius),
            timestep: self.timestep.unwrap_or(base.timestep),
            gravity: self.gravity.unwrap_or(base.gravity),
            global_damping: self.global_damping.unwrap_or(base.global_damping),
            boundary_damping: self.boundary_damping.unwrap_or(base.boundary_damping),
            spring: self.spring.unwrap_or(base.spring),
            damping: self.damping.unwrap_or(base.damping),
            shear: self.shear.unwrap_or(base.shear),
            attraction: self.attraction.unwrap_or(base.attraction),
            collider_pos: self.collider_pos.unwrap_or(base.collider_pos),
            collider_radius: self.collider_radius.unwrap_or(base.collider_radius),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}
