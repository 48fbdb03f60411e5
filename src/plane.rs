//! The cutting plane and the point classification derived from it.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

// Point classification values. They are chosen so that the bitwise AND over
// the points of a cell is non-zero only when every point lies strictly on
// the same side of the plane.
pub const ON: u8 = 0;
pub const BELOW: u8 = 1;
pub const ABOVE: u8 = 2;

/// An infinite plane through `origin` with normal `normal`.
///
/// The normal does not have to be unit length: [`Plane::evaluate`] returns
/// `normal · (p - origin)`, which only needs the right sign. Use
/// [`Plane::unit_normal`] where a direction is wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub origin: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Default for Plane {
    fn default() -> Self {
        Plane {
            origin: Point3::origin(),
            normal: Vector3::z(),
        }
    }
}

impl Plane {
    pub const fn new(origin: Point3<Real>, normal: Vector3<Real>) -> Self {
        Plane { origin, normal }
    }

    /// Create a plane from three points.
    /// The normal direction follows the right-hand rule: (p2-p1) × (p3-p1)
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));

        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            // Degenerate triangle, fall back to the XY plane through p1
            return Plane {
                origin: p1,
                normal: Vector3::z(),
            };
        }

        Plane {
            origin: p1,
            normal: normal.normalize(),
        }
    }

    /// Signed plane function `normal · (p - origin)`.
    #[inline]
    pub fn evaluate(&self, p: &[Real; 3]) -> Real {
        self.normal.x * (p[0] - self.origin.x)
            + self.normal.y * (p[1] - self.origin.y)
            + self.normal.z * (p[2] - self.origin.z)
    }

    /// Classify a point as [`ABOVE`], [`BELOW`] or [`ON`] the plane.
    #[inline]
    pub fn classify(&self, p: &[Real; 3]) -> u8 {
        let eval = self.evaluate(p);
        if eval > 0.0 {
            ABOVE
        } else if eval < 0.0 {
            BELOW
        } else {
            ON
        }
    }

    /// Unit normal; a zero normal stays zero.
    pub fn unit_normal(&self) -> Vector3<Real> {
        self.normal
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Translate the plane by `distance` along its unit normal.
    pub fn push(&mut self, distance: Real) {
        self.origin += self.unit_normal() * distance;
    }

    /// Flip the plane (reverse the normal, keep the origin)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            origin: self.origin,
            normal: -self.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_sign() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.5), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(plane.classify(&[0.0, 0.0, 1.0]), ABOVE);
        assert_eq!(plane.classify(&[3.0, -1.0, 0.0]), BELOW);
        assert_eq!(plane.classify(&[7.0, 7.0, 0.5]), ON);
        assert_eq!(plane.evaluate(&[0.0, 0.0, 1.0]), 1.0);
    }

    #[test]
    fn zero_normal_stays_zero() {
        let plane = Plane::new(Point3::origin(), Vector3::zeros());
        assert_eq!(plane.unit_normal(), Vector3::zeros());
    }
}
