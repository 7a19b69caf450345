use glam::Vec3;

use crate::domain::SimulationParams;

/// Distances below this are treated as this when normalizing the contact
/// normal, so coincident particles never divide by zero.
pub const MIN_CONTACT_DISTANCE: f32 = 1e-6;

/// A sphere taking part in a contact test.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
}

/// Contact force on `a` from `b`, or `None` when they do not overlap.
///
/// Spring repulsion along the normal, damping on relative velocity, shear on
/// its tangential part, attraction along the separation.
#[inline(always)]
pub fn collide_spheres(a: Sphere, b: Sphere, params: &SimulationParams, attraction: f32) -> Option<Vec3> {
    let rel_pos = b.pos - a.pos;
    let dist = rel_pos.length();
    let collide_dist = a.radius + b.radius;

    if dist >= collide_dist {
        return None;
    }

    let norm = rel_pos / dist.max(MIN_CONTACT_DISTANCE);
    let rel_vel = b.vel - a.vel;
    let tan_vel = rel_vel - rel_vel.dot(norm) * norm;

    let mut force = -params.spring * (collide_dist - dist) * norm;
    force += params.damping * rel_vel;
    force += params.shear * tan_vel;
    force += attraction * rel_pos;
    Some(force)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32, vx: f32) -> Sphere {
        Sphere {
            pos: Vec3::new(x, 0.0, 0.0),
            vel: Vec3::new(vx, 0.0, 0.0),
            radius: 0.023,
        }
    }

    #[test]
    fn separated_spheres_do_not_interact() {
        let params = SimulationParams::default();
        assert!(collide_spheres(sphere(0.0, 0.0), sphere(0.05, 0.0), &params, 0.0).is_none());
        assert!(collide_spheres(sphere(0.0, 0.0), sphere(0.0, 0.0), &params, 0.0).is_some());
    }

    #[test]
    fn overlap_pushes_apart() {
        let params = SimulationParams::default();
        let f = collide_spheres(sphere(0.0, 0.0), sphere(0.02, 0.0), &params, 0.0).unwrap();
        // spring * penetration = 0.5 * 0.026
        assert!((f.x + 0.013).abs() < 1e-6);
        assert_eq!(f.y, 0.0);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn shear_acts_on_tangential_velocity_only() {
        let params = SimulationParams {
            spring: 0.0,
            damping: 0.0,
            ..SimulationParams::default()
        };
        let a = sphere(0.0, 0.0);
        let b = Sphere {
            vel: Vec3::new(0.3, 0.2, 0.0),
            ..sphere(0.02, 0.0)
        };
        let f = collide_spheres(a, b, &params, 0.0).unwrap();
        assert!(f.x.abs() < 1e-7);
        assert!((f.y - params.shear * 0.2).abs() < 1e-7);
    }

    #[test]
    fn attraction_pulls_towards_other() {
        let params = SimulationParams {
            spring: 0.0,
            damping: 0.0,
            shear: 0.0,
            ..SimulationParams::default()
        };
        let f = collide_spheres(sphere(0.0, 0.0), sphere(0.02, 0.0), &params, 0.5).unwrap();
        assert!((f.x - 0.01).abs() < 1e-7);
    }

    #[test]
    fn coincident_spheres_stay_finite() {
        let params = SimulationParams::default();
        let f = collide_spheres(sphere(0.1, 1.0), sphere(0.1, -1.0), &params, 0.0).unwrap();
        assert!(f.is_finite());
    }
}
