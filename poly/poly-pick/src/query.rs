//! Raycasts and proximity queries against meshes and scenes.

use nalgebra::Point3;
use poly_types::Mesh;

use crate::intersect::ray_triangle;
use crate::ray::Ray;

/// The nearest intersection of a ray with a mesh or scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Index of the hit mesh within the queried slice (0 for a
    /// single-mesh raycast).
    pub mesh_index: usize,
    /// Index of the hit triangle.
    pub face_index: usize,
    /// Ray parameter at the hit.
    pub t: f32,
    /// World-space hit point.
    pub point: Point3<f32>,
}

/// Scan every triangle of a mesh, in world space, for the nearest hit.
#[must_use]
pub fn raycast_mesh(ray: &Ray, mesh: &Mesh) -> Option<RaycastHit> {
    let geometry = &mesh.geometry;
    let mut best: Option<RaycastHit> = None;

    for (face_index, tri) in geometry.triangles().enumerate() {
        let v0 = mesh.world_position(tri[0]);
        let v1 = mesh.world_position(tri[1]);
        let v2 = mesh.world_position(tri[2]);

        if let Some(hit) = ray_triangle(ray, v0, v1, v2) {
            if best.map_or(true, |b| hit.t < b.t) {
                best = Some(RaycastHit {
                    mesh_index: 0,
                    face_index,
                    t: hit.t,
                    point: ray.point_at(hit.t),
                });
            }
        }
    }

    best
}

/// Raycast a scene: the visible mesh with the smallest hit `t` wins.
#[must_use]
pub fn raycast_scene(ray: &Ray, meshes: &[Mesh]) -> Option<RaycastHit> {
    let mut best: Option<RaycastHit> = None;

    for (mesh_index, mesh) in meshes.iter().enumerate() {
        if !mesh.visible {
            continue;
        }
        if let Some(mut hit) = raycast_mesh(ray, mesh) {
            hit.mesh_index = mesh_index;
            if best.map_or(true, |b| hit.t < b.t) {
                best = Some(hit);
            }
        }
    }

    best
}

/// Brute-force nearest vertex to a world-space point.
#[must_use]
pub fn find_closest_vertex(mesh: &Mesh, point: Point3<f32>) -> Option<u32> {
    let mut best: Option<(u32, f32)> = None;

    for i in 0..mesh.geometry.vertex_count() as u32 {
        let d = (mesh.world_position(i) - point).norm_squared();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }

    best.map(|(i, _)| i)
}

/// Whether a world-space point lies within `threshold` of the given
/// derived edge, measured against the segment clamped to its endpoints.
///
/// An out-of-range edge index is a miss, not an error.
#[must_use]
pub fn is_point_near_edge(mesh: &Mesh, point: Point3<f32>, edge_index: usize, threshold: f32) -> bool {
    let Some(edge) = mesh.geometry.edges.get(edge_index) else {
        return false;
    };

    let a = mesh.world_position(edge.a);
    let b = mesh.world_position(edge.b);
    let ab = b - a;
    let len_sq = ab.norm_squared();

    let t = if len_sq < f32::EPSILON {
        0.0
    } else {
        ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    };

    let closest = a + ab * t;
    (point - closest).norm() <= threshold
}
