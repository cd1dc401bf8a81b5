//! Orbital-plane geometry shared by the node solver and the balance model.
//!
//! Provides plane-normal construction from (inclination, ascending node)
//! pairs, the apparent inclination between two planes, and the angle
//! wrapping helpers every caller needs.

pub mod angle;
pub mod plane;

pub use angle::{angular_distance_deg, normalize_deg, normalize_to_pm180};
pub use plane::{OrbitalPlane, PlaneNormal, apparent_inclination_deg, plane_normal};
