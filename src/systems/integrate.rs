//! Integrator - explicit Euler step with wall reflection
//!
//! Per particle:
//! - gravity accelerates velocity, global damping scales it
//! - position advances by velocity * dt
//! - any axis past a wall is clamped to it and that velocity component is
//!   scaled by `boundary_damping` (negative, so it reverses)

use glam::{Vec3, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::{SimulationParams, WORLD_HALF_EXTENT};

/// Advance every particle by `dt`. Particles are independent.
pub fn integrate(positions: &mut [Vec4], velocities: &mut [Vec4], params: &SimulationParams, dt: f32) {
    debug_assert_eq!(positions.len(), velocities.len());

    #[cfg(feature = "parallel")]
    {
        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .for_each(|(pos, vel)| integrate_particle(pos, vel, params, dt));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
            integrate_particle(pos, vel, params, dt);
        }
    }
}

#[inline(always)]
fn integrate_particle(pos: &mut Vec4, vel: &mut Vec4, params: &SimulationParams, dt: f32) {
    let mut p = pos.truncate();
    let mut v = vel.truncate();

    v += params.gravity * dt;
    v *= params.global_damping;
    p += v * dt;

    let limit = WORLD_HALF_EXTENT - params.particle_radius;
    reflect(&mut p, &mut v, limit, params.boundary_damping);

    *pos = p.extend(pos.w);
    *vel = v.extend(vel.w);
}

#[inline(always)]
fn reflect(p: &mut Vec3, v: &mut Vec3, limit: f32, boundary_damping: f32) {
    for axis in 0..3 {
        if p[axis] > limit {
            p[axis] = limit;
            v[axis] *= boundary_damping;
        }
        if p[axis] < -limit {
            p[axis] = -limit;
            v[axis] *= boundary_damping;
        }
    }
}
