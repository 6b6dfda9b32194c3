//! The three CSG operations.

use poly_types::{Mesh, Transform};
use tracing::debug;

use crate::bsp::Bsp;
use crate::polygon::{mesh_to_polygons, polygons_to_geometry};

/// Which boolean combination to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperation {
    /// Everything in either solid.
    Union,
    /// The first solid with the second carved away.
    Difference,
    /// Only the overlap of both solids.
    Intersect,
}

/// Combine two meshes with a boolean operation.
///
/// Both meshes are baked into world space first; the output mesh keeps
/// the first mesh's identity and material but has an identity
/// transform, since its positions are already world-space.
#[must_use]
pub fn boolean_mesh(a: &Mesh, b: &Mesh, operation: BooleanOperation) -> Mesh {
    let mut tree_a = Bsp::new(mesh_to_polygons(a));
    let mut tree_b = Bsp::new(mesh_to_polygons(b));

    match operation {
        BooleanOperation::Union => {
            tree_a.clip_to(&tree_b);
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_a.build(tree_b.all_polygons());
        }
        BooleanOperation::Difference => {
            tree_a.invert();
            tree_a.clip_to(&tree_b);
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_a.build(tree_b.all_polygons());
            tree_a.invert();
        }
        BooleanOperation::Intersect => {
            tree_a.invert();
            tree_b.clip_to(&tree_a);
            tree_b.invert();
            tree_a.clip_to(&tree_b);
            tree_b.clip_to(&tree_a);
            tree_a.build(tree_b.all_polygons());
            tree_a.invert();
        }
    }

    let polygons = tree_a.all_polygons();
    debug!(
        op = ?operation,
        polygons = polygons.len(),
        "csg operation complete"
    );

    let mut out = a.with_geometry(polygons_to_geometry(&polygons));
    out.transform = Transform::identity();
    out
}

/// `a` unified with `b`.
#[must_use]
pub fn union(a: &Mesh, b: &Mesh) -> Mesh {
    boolean_mesh(a, b, BooleanOperation::Union)
}

/// `a` with `b` carved away.
#[must_use]
pub fn difference(a: &Mesh, b: &Mesh) -> Mesh {
    boolean_mesh(a, b, BooleanOperation::Difference)
}

/// The overlap of `a` and `b`.
#[must_use]
pub fn intersection(a: &Mesh, b: &Mesh) -> Mesh {
    boolean_mesh(a, b, BooleanOperation::Intersect)
}
