//! A concrete triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};

/// Three vertex positions forming a triangle, CCW front-facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f32>,
    /// Second vertex.
    pub v1: Point3<f32>,
    /// Third vertex.
    pub v2: Point3<f32>,
}

impl Triangle {
    /// Create a triangle from three positions.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit normal by the right-hand rule, or zero when degenerate.
    #[must_use]
    pub fn normal(&self) -> Vector3<f32> {
        let n = (self.v1 - self.v0).cross(&(self.v2 - self.v0));
        let len = n.norm();
        if len < 1e-12 { Vector3::zeros() } else { n / len }
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0)).norm() * 0.5
    }

    /// Arithmetic mean of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3<f32> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }
}
