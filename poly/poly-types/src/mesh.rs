//! Scene-level mesh wrapper.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Geometry, Material, Transform};

/// A geometry with its scene metadata: identity, material, transform,
/// and visibility flags.
///
/// Operators read only `geometry` and `transform`; everything else is
/// carried through so the host can correlate mesh versions by `id`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Stable identity, preserved across operator applications.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The triangle geometry.
    pub geometry: Geometry,
    /// Surface appearance, opaque to the kernel.
    pub material: Material,
    /// Local-to-world transform.
    pub transform: Transform,
    /// Whether the mesh participates in picking and display.
    pub visible: bool,
    /// Whether the host forbids edits.
    pub locked: bool,
    /// Optional scene-graph parent.
    pub parent_id: Option<String>,
}

impl Mesh {
    /// Create a mesh with default material, identity transform, and no
    /// parent.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry,
            material: Material::default(),
            transform: Transform::identity(),
            visible: true,
            locked: false,
            parent_id: None,
        }
    }

    /// Clone this mesh's metadata around a replacement geometry.
    ///
    /// This is the operator output path: identity, name, material,
    /// transform, and flags survive; only the geometry changes.
    #[must_use]
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            geometry,
            ..self.clone()
        }
    }

    /// World-space position of vertex `i`.
    #[inline]
    #[must_use]
    pub fn world_position(&self, i: u32) -> Point3<f32> {
        self.transform.apply_point(self.geometry.position(i))
    }
}

/// A unit cube centered at the origin: 8 shared vertices, 12 triangles,
/// CCW winding viewed from outside. Normals are recomputed from
/// positions; UVs are zeroed.
///
/// Kept as a fixture for tests and demos; primitive factories proper
/// live outside the kernel.
#[must_use]
pub fn unit_cube() -> Geometry {
    let mut g = Geometry::with_capacity(8, 12);

    let corners = [
        (-0.5, -0.5, -0.5),
        (0.5, -0.5, -0.5),
        (0.5, 0.5, -0.5),
        (-0.5, 0.5, -0.5),
        (-0.5, -0.5, 0.5),
        (0.5, -0.5, 0.5),
        (0.5, 0.5, 0.5),
        (-0.5, 0.5, 0.5),
    ];
    for (x, y, z) in corners {
        g.push_vertex(Point3::new(x, y, z), Vector3::zeros(), (0.0, 0.0));
    }

    g.indices.extend([
        // bottom (z = -0.5)
        0, 2, 1, 0, 3, 2, //
        // top (z = 0.5)
        4, 5, 6, 4, 6, 7, //
        // front (y = -0.5)
        0, 1, 5, 0, 5, 4, //
        // back (y = 0.5)
        3, 7, 6, 3, 6, 2, //
        // left (x = -0.5)
        0, 4, 7, 0, 7, 3, //
        // right (x = 0.5)
        1, 2, 6, 1, 6, 5,
    ]);

    g.recompute_vertex_normals();
    g.rebuild();
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_counts() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.edges.len(), 18);
        assert_eq!(cube.faces.len(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn unit_cube_bounds() {
        let cube = unit_cube();
        let bounds = cube.bounds();
        assert_eq!(bounds.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(bounds.max, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn with_geometry_preserves_identity() {
        let mesh = Mesh::new("m-1", "Cube", unit_cube());
        let out = mesh.with_geometry(Geometry::new());
        assert_eq!(out.id, "m-1");
        assert_eq!(out.name, "Cube");
        assert!(out.geometry.is_empty());
    }

    #[test]
    fn world_position_applies_transform() {
        let mut mesh = Mesh::new("m-1", "Cube", unit_cube());
        mesh.transform.position = Vector3::new(10.0, 0.0, 0.0);
        let p = mesh.world_position(1);
        assert!((p.x - 10.5).abs() < 1e-6);
    }
}
