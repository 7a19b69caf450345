//! Per-step systems: integration and contact resolution.

pub mod collide;
pub mod integrate;

pub use collide::{collide, collide_spheres, CollideStats, Sphere, MIN_CONTACT_DISTANCE};
pub use integrate::integrate;
