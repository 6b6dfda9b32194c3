//! Viewport camera model and screen-to-world ray construction.

use nalgebra::{Point3, Vector3};

use crate::ray::Ray;

/// Projection mode of the picking camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view.
    Perspective,
    /// Orthographic projection scaled by `zoom`.
    Orthographic,
}

/// The camera state needed to build picking rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Projection mode.
    pub projection: Projection,
    /// Eye position.
    pub position: Point3<f32>,
    /// Look-at target.
    pub target: Point3<f32>,
    /// Approximate up direction; re-orthogonalised internally.
    pub up: Vector3<f32>,
    /// Vertical field of view in radians (perspective only).
    pub fov: f32,
    /// Half-height of the view volume (orthographic only).
    pub zoom: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            position: Point3::new(5.0, 5.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: 50.0_f32.to_radians(),
            zoom: 5.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Orthonormal view basis: `(forward, right, up)`.
    #[must_use]
    pub fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        (forward, right, up)
    }
}

/// Build a world-space ray through a canvas pixel.
///
/// `(x, y)` are canvas pixel coordinates with the origin at the top
/// left; `(width, height)` is the canvas size.
#[must_use]
pub fn ray_from_screen(x: f32, y: f32, width: f32, height: f32, camera: &Camera) -> Ray {
    let ndc_x = 2.0 * x / width - 1.0;
    let ndc_y = 1.0 - 2.0 * y / height;
    let aspect = width / height;
    let (forward, right, up) = camera.basis();

    match camera.projection {
        Projection::Perspective => {
            let half = (camera.fov * 0.5).tan();
            let direction =
                (forward + right * (ndc_x * half * aspect) + up * (ndc_y * half)).normalize();
            Ray::new(camera.position, direction)
        }
        Projection::Orthographic => {
            let origin = camera.position
                + right * (ndc_x * camera.zoom * aspect)
                + up * (ndc_y * camera.zoom);
            Ray::new(origin, forward)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn looking_down_z() -> Camera {
        Camera {
            position: Point3::new(0.0, 0.0, 10.0),
            target: Point3::origin(),
            ..Camera::default()
        }
    }

    #[test]
    fn center_pixel_looks_at_target() {
        let camera = looking_down_z();
        let ray = ray_from_screen(400.0, 300.0, 800.0, 600.0, &camera);
        assert_eq!(ray.origin, camera.position);
        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(ray.direction.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn left_pixel_tilts_left() {
        let camera = looking_down_z();
        let ray = ray_from_screen(0.0, 300.0, 800.0, 600.0, &camera);
        assert!(ray.direction.x < 0.0);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let camera = Camera {
            projection: Projection::Orthographic,
            ..looking_down_z()
        };
        let a = ray_from_screen(0.0, 0.0, 800.0, 600.0, &camera);
        let b = ray_from_screen(800.0, 600.0, 800.0, 600.0, &camera);
        assert_relative_eq!(a.direction.z, b.direction.z, epsilon = 1e-6);
        assert!(a.origin.x < b.origin.x);
    }

    #[test]
    fn basis_is_orthonormal() {
        let (forward, right, up) = looking_down_z().basis();
        assert_relative_eq!(forward.dot(&right), 0.0, epsilon = 1e-6);
        assert_relative_eq!(forward.dot(&up), 0.0, epsilon = 1e-6);
        assert_relative_eq!(up.norm(), 1.0, epsilon = 1e-6);
    }
}
