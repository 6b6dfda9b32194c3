//! World-space rays.

use nalgebra::{Point3, Vector3};

/// A ray defined by an origin point and a direction vector.
///
/// The direction does not need to be normalized, but must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin of the ray.
    pub origin: Point3<f32>,
    /// The direction of the ray (not necessarily normalized).
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    #[must_use]
    pub const fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Returns a normalized version of this ray.
    ///
    /// If the direction is zero, returns the ray unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.direction.norm();
        if norm < f32::EPSILON {
            return *self;
        }
        Self {
            origin: self.origin,
            direction: self.direction / norm,
        }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_at_scales_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(2.0, 0.0, 0.0));
        let p = ray.point_at(3.0);
        assert_relative_eq!(p.x, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn normalized_keeps_zero_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::zeros());
        assert_eq!(ray.normalized(), ray);
    }

    #[test]
    fn normalized_has_unit_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(3.0, 4.0, 0.0)).normalized();
        assert_relative_eq!(ray.direction.norm(), 1.0, epsilon = 1e-6);
    }
}
