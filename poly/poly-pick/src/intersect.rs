//! Möller–Trumbore ray/triangle and segment/triangle intersection.

use nalgebra::Point3;

use crate::ray::Ray;

/// Intersection epsilon: rejects parallel rays and hits at the origin.
pub const RAY_EPSILON: f32 = 1e-6;

/// A ray/triangle intersection with barycentric coordinates.
///
/// The hit point is `(1 - u - v) * v0 + u * v1 + v * v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter at the hit.
    pub t: f32,
    /// Barycentric weight of `v1`.
    pub u: f32,
    /// Barycentric weight of `v2`.
    pub v: f32,
}

/// Intersect a ray with a triangle.
///
/// Accepts hits with `t > RAY_EPSILON`, `u >= 0`, `v >= 0`, and
/// `u + v <= 1`; edge grazes (`u == 0` or `v == 0`) count as hits.
#[must_use]
pub fn ray_triangle(
    ray: &Ray,
    v0: Point3<f32>,
    v1: Point3<f32>,
    v2: Point3<f32>,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(&edge2);
    let a = edge1.dot(&h);
    if a.abs() < RAY_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if u < 0.0 {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t > RAY_EPSILON {
        Some(TriangleHit { t, u, v })
    } else {
        None
    }
}

/// Intersect a line segment with a triangle.
///
/// Same predicate as [`ray_triangle`] with the direction taken as
/// `end - start` and the parameter restricted to `[0, 1]`.
#[must_use]
pub fn segment_triangle(
    start: Point3<f32>,
    end: Point3<f32>,
    v0: Point3<f32>,
    v1: Point3<f32>,
    v2: Point3<f32>,
) -> Option<TriangleHit> {
    let ray = Ray::new(start, end - start);
    let hit = ray_triangle(&ray, v0, v1, v2)?;
    if hit.t <= 1.0 { Some(hit) } else { None }
}
