//! Orbital-plane normals and the angle between two planes.
//!
//! A plane inclined by `i` to the reference plane, with ascending node `Ω`
//! measured in the reference plane, has unit normal
//! `n = (sin i sin Ω, sin i cos Ω, cos i)`.
//! The apparent inclination of one plane as seen from another is the angle
//! between their normals.

/// Unit normal of an orbital plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneNormal([f64; 3]);

impl PlaneNormal {
    /// Cartesian components `[x, y, z]`.
    pub const fn components(&self) -> [f64; 3] {
        self.0
    }

    pub fn dot(&self, other: &PlaneNormal) -> f64 {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        ax * bx + ay * by + az * bz
    }

    /// Euclidean length. Always 1 up to rounding.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Build the unit normal of a plane from its inclination and ascending node.
///
/// Inputs are unrestricted real degrees; periodicity handles wrapping.
pub fn plane_normal(inclination_deg: f64, node_deg: f64) -> PlaneNormal {
    let (sin_i, cos_i) = inclination_deg.to_radians().sin_cos();
    let (sin_o, cos_o) = node_deg.to_radians().sin_cos();
    PlaneNormal([sin_i * sin_o, sin_i * cos_o, cos_i])
}

/// Angle between two plane normals in degrees, range [0, 180].
///
/// The dot product is clamped to [-1, 1] before `acos`: rounding can push
/// it fractionally outside that interval for (nearly) parallel planes.
pub fn apparent_inclination_deg(n1: &PlaneNormal, n2: &PlaneNormal) -> f64 {
    n1.dot(n2).clamp(-1.0, 1.0).acos().to_degrees()
}

/// An orbital plane given by its elements relative to the reference plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPlane {
    /// Inclination to the reference plane in degrees.
    pub inclination_deg: f64,
    /// Longitude of the ascending node in degrees.
    pub node_deg: f64,
}

impl OrbitalPlane {
    pub const fn new(inclination_deg: f64, node_deg: f64) -> Self {
        Self {
            inclination_deg,
            node_deg,
        }
    }

    pub fn normal(&self) -> PlaneNormal {
        plane_normal(self.inclination_deg, self.node_deg)
    }

    /// Apparent inclination of `self` as seen from `other`'s plane.
    pub fn apparent_inclination_to(&self, other: &OrbitalPlane) -> f64 {
        apparent_inclination_deg(&self.normal(), &other.normal())
    }
}
