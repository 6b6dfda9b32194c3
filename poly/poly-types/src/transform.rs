//! Scale / rotate / translate transforms and world-axis identifiers.

use nalgebra::{Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z.
    Z,
}

impl Axis {
    /// Component index of this axis in a packed coordinate triple.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// A mesh transform: non-uniform scale, Euler XYZ rotation (radians),
/// and translation.
///
/// Application order is scale, then rotation about X, Y, Z in that
/// order, then translation. Picking, sculpt hit-testing, and CSG baking
/// all depend on this ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation applied last.
    pub position: Vector3<f32>,
    /// Euler XYZ rotation in radians.
    pub rotation: Vector3<f32>,
    /// Per-axis scale applied first.
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Whether this transform leaves points unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.position == Vector3::zeros()
            && self.rotation == Vector3::zeros()
            && self.scale == Vector3::new(1.0, 1.0, 1.0)
    }

    /// Transform a local-space point into world space.
    #[must_use]
    pub fn apply_point(&self, p: Point3<f32>) -> Point3<f32> {
        let scaled = Vector3::new(
            p.x * self.scale.x,
            p.y * self.scale.y,
            p.z * self.scale.z,
        );
        Point3::from(self.rotate_vector(scaled) + self.position)
    }

    /// Rotate a direction by the Euler XYZ rotation, ignoring scale and
    /// translation. Suitable for normals under rigid transforms.
    #[must_use]
    pub fn rotate_vector(&self, v: Vector3<f32>) -> Vector3<f32> {
        let v = rotate_x(v, self.rotation.x);
        let v = rotate_y(v, self.rotation.y);
        rotate_z(v, self.rotation.z)
    }

    /// Map a world-space point back into local space.
    ///
    /// Exact inverse of [`Transform::apply_point`]: untranslate, unwind
    /// the rotations in reverse order, then divide out the scale.
    /// Zero scale components are left undivided.
    #[must_use]
    pub fn inverse_point(&self, p: Point3<f32>) -> Point3<f32> {
        let v = p.coords - self.position;
        let v = rotate_z(v, -self.rotation.z);
        let v = rotate_y(v, -self.rotation.y);
        let v = rotate_x(v, -self.rotation.x);
        Point3::new(
            if self.scale.x.abs() > f32::EPSILON { v.x / self.scale.x } else { v.x },
            if self.scale.y.abs() > f32::EPSILON { v.y / self.scale.y } else { v.y },
            if self.scale.z.abs() > f32::EPSILON { v.z / self.scale.z } else { v.z },
        )
    }

    /// The equivalent homogeneous matrix `T * Rz * Ry * Rx * S`.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::new_translation(&self.position);
        let rx = Matrix4::from_axis_angle(&Vector3::x_axis(), self.rotation.x);
        let ry = Matrix4::from_axis_angle(&Vector3::y_axis(), self.rotation.y);
        let rz = Matrix4::from_axis_angle(&Vector3::z_axis(), self.rotation.z);
        let s = Matrix4::new_nonuniform_scaling(&self.scale);
        t * rz * ry * rx * s
    }
}

fn rotate_x(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos)
}

fn rotate_y(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

fn rotate_z(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_leaves_points_alone() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(t.apply_point(p), p);
        assert!(t.is_identity());
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let t = Transform {
            position: Vector3::new(10.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, FRAC_PI_2),
            scale: Vector3::new(2.0, 1.0, 1.0),
        };
        // (1,0,0) -> scale (2,0,0) -> rotZ 90deg (0,2,0) -> translate (10,2,0)
        let p = t.apply_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform {
            position: Vector3::new(1.0, -2.0, 3.0),
            rotation: Vector3::new(0.4, 1.1, -0.7),
            scale: Vector3::new(2.0, 0.5, 3.0),
        };
        let p = Point3::new(0.3, -1.2, 2.5);
        let back = t.inverse_point(t.apply_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-4);
    }

    #[test]
    fn matrix_agrees_with_apply_point() {
        let t = Transform {
            position: Vector3::new(-1.0, 4.0, 0.5),
            rotation: Vector3::new(0.2, -0.3, 0.9),
            scale: Vector3::new(1.5, 2.0, 0.75),
        };
        let p = Point3::new(1.0, 1.0, 1.0);
        let via_matrix = t.matrix().transform_point(&p);
        let direct = t.apply_point(p);
        assert_relative_eq!(via_matrix.x, direct.x, epsilon = 1e-4);
        assert_relative_eq!(via_matrix.y, direct.y, epsilon = 1e-4);
        assert_relative_eq!(via_matrix.z, direct.z, epsilon = 1e-4);
    }

    #[test]
    fn axis_indices() {
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::Y.index(), 1);
        assert_eq!(Axis::Z.index(), 2);
    }
}
