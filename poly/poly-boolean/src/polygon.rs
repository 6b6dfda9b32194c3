//! CSG polygons, planes, and mesh conversion.

use nalgebra::{Point3, Vector3};
use poly_types::{Geometry, Mesh};

/// Classification tolerance against a splitting plane.
pub(crate) const PLANE_EPSILON: f32 = 1e-5;

/// An oriented plane `normal . p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vector3<f32>,
    /// Signed offset along the normal.
    pub w: f32,
}

impl Plane {
    /// Plane through three points, or `None` when they are collinear.
    #[must_use]
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len < 1e-12 {
            return None;
        }
        let normal = n / len;
        Some(Self {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    /// Reverse the plane's orientation.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of a point from the plane.
    #[inline]
    #[must_use]
    pub fn distance(&self, p: Point3<f32>) -> f32 {
        self.normal.dot(&p.coords) - self.w
    }
}

/// A polygon vertex carrying position and normal. Texture coordinates
/// are not tracked through CSG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsgVertex {
    /// World-space position.
    pub position: Point3<f32>,
    /// Interpolated unit normal.
    pub normal: Vector3<f32>,
}

impl CsgVertex {
    /// Flip the vertex for an inverted polygon.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation toward another vertex.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position + (other.position - self.position) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }
}

/// A coplanar vertex ring with its plane. Rings may grow beyond three
/// vertices while polygons are split inside the BSP; they are
/// triangulated only when emitting the final geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// The vertex ring, wound CCW against the plane normal.
    pub vertices: Vec<CsgVertex>,
    /// The containing plane.
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from a vertex ring, deriving the plane from the
    /// first three vertices. `None` when the ring is degenerate.
    #[must_use]
    pub fn new(vertices: Vec<CsgVertex>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(
            vertices[0].position,
            vertices[1].position,
            vertices[2].position,
        )?;
        Some(Self { vertices, plane })
    }

    /// A polygon on a known plane (used for split fragments, whose
    /// first vertices may have become collinear).
    #[must_use]
    pub(crate) fn on_plane(vertices: Vec<CsgVertex>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Reverse winding and orientation.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }
}

/// Bake a mesh into world-space polygons, one per triangle.
///
/// Positions go through the full transform; normals are rotated (scale
/// is not compensated) and renormalised. Degenerate triangles bake to
/// nothing.
#[must_use]
pub fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    let geometry = &mesh.geometry;
    let mut polygons = Vec::with_capacity(geometry.triangle_count());

    for tri in geometry.triangles() {
        let vertices = tri
            .iter()
            .map(|&v| {
                let normal = mesh.transform.rotate_vector(geometry.normal(v));
                let len = normal.norm();
                CsgVertex {
                    position: mesh.world_position(v),
                    normal: if len < 1e-12 { normal } else { normal / len },
                }
            })
            .collect();
        if let Some(polygon) = Polygon::new(vertices) {
            polygons.push(polygon);
        }
    }

    polygons
}

/// Fan-triangulate a polygon soup into fresh geometry.
///
/// Vertices are not shared between polygons; UVs are written as
/// `(0, 0)`.
#[must_use]
pub fn polygons_to_geometry(polygons: &[Polygon]) -> Geometry {
    let mut geometry = Geometry::new();

    for polygon in polygons {
        if polygon.vertices.len() < 3 {
            continue;
        }
        let base: Vec<u32> = polygon
            .vertices
            .iter()
            .map(|v| geometry.push_vertex(v.position, v.normal, (0.0, 0.0)))
            .collect();
        for i in 1..base.len() - 1 {
            geometry.indices.extend([base[0], base[i], base[i + 1]]);
        }
    }

    geometry.rebuild();
    geometry
}
