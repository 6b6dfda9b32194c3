//! Core subdivision passes.

use hashbrown::{HashMap, HashSet};
use nalgebra::Vector3;
use poly_types::{Edge, Geometry, Mesh};
use tracing::debug;

use crate::params::SubdivideParams;

/// Subdivide a mesh, splitting each triangle 1-to-4 per iteration.
///
/// `iterations == 0` (or an empty mesh) is a no-op and returns the
/// input unchanged.
#[must_use]
pub fn subdivide(mesh: &Mesh, params: &SubdivideParams) -> Mesh {
    if params.iterations == 0 || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();
    for i in 0..params.iterations {
        geometry = subdivide_once(&geometry, params.smooth);
        debug!(
            iteration = i + 1,
            triangles = geometry.triangle_count(),
            vertices = geometry.vertex_count(),
            "subdivision pass complete"
        );
    }

    geometry.rebuild();
    mesh.with_geometry(geometry)
}

/// One full 1-to-4 split, with the optional smoothing pass afterwards.
fn subdivide_once(geometry: &Geometry, smooth: bool) -> Geometry {
    let original_count = geometry.vertex_count() as u32;

    let mut out = Geometry::with_capacity(
        geometry.vertex_count() * 2,
        geometry.triangle_count() * 4,
    );
    out.vertices = geometry.vertices.clone();
    out.normals = geometry.normals.clone();
    out.uvs = geometry.uvs.clone();

    // Map from canonical edge to its shared midpoint vertex.
    let mut midpoints: HashMap<Edge, u32> = HashMap::new();

    for tri in geometry.triangles() {
        let [v0, v1, v2] = tri;
        let m01 = midpoint(v0, v1, geometry, &mut out, &mut midpoints);
        let m12 = midpoint(v1, v2, geometry, &mut out, &mut midpoints);
        let m20 = midpoint(v2, v0, geometry, &mut out, &mut midpoints);

        // Three corner triangles and one centre triangle.
        out.indices.extend([v0, m01, m20]);
        out.indices.extend([v1, m12, m01]);
        out.indices.extend([v2, m20, m12]);
        out.indices.extend([m01, m12, m20]);
    }

    if smooth {
        relax_original_vertices(&mut out, original_count);
    }

    out
}

/// Get or create the midpoint vertex for an edge, memoised by the
/// canonical edge key. Attributes interpolate at `t = 0.5`; the normal
/// is renormalised.
fn midpoint(
    v0: u32,
    v1: u32,
    geometry: &Geometry,
    out: &mut Geometry,
    midpoints: &mut HashMap<Edge, u32>,
) -> u32 {
    let edge = Edge::new(v0, v1);
    if let Some(&idx) = midpoints.get(&edge) {
        return idx;
    }

    let position = nalgebra::center(&geometry.position(v0), &geometry.position(v1));

    let normal = (geometry.normal(v0) + geometry.normal(v1)) * 0.5;
    let normal = if normal.norm() < 1e-12 {
        Vector3::zeros()
    } else {
        normal.normalize()
    };

    let (u0, w0) = geometry.uv(v0);
    let (u1, w1) = geometry.uv(v1);
    let uv = ((u0 + u1) * 0.5, (w0 + w1) * 0.5);

    let idx = out.push_vertex(position, normal, uv);
    midpoints.insert(edge, idx);
    idx
}

/// Move each original vertex toward the centroid of its post-split
/// neighbourhood, blended at 0.25. Midpoint vertices are untouched.
fn relax_original_vertices(geometry: &mut Geometry, original_count: u32) {
    let mut neighbours: Vec<HashSet<u32>> = vec![HashSet::new(); original_count as usize];

    for tri in geometry.triangles() {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            if a < original_count {
                neighbours[a as usize].insert(b);
            }
            if b < original_count {
                neighbours[b as usize].insert(a);
            }
        }
    }

    // Read every centroid from the pre-relax positions.
    let snapshot: Vec<_> = (0..geometry.vertex_count() as u32)
        .map(|i| geometry.position(i))
        .collect();

    for (v, adjacent) in neighbours.iter().enumerate() {
        if adjacent.is_empty() {
            continue;
        }
        let mut centroid = Vector3::zeros();
        for &n in adjacent {
            centroid += snapshot[n as usize].coords;
        }
        centroid /= adjacent.len() as f32;

        let old = snapshot[v].coords;
        let blended = old + (centroid - old) * 0.25;
        geometry.set_position(v as u32, blended.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use poly_types::{unit_cube, Mesh};

    fn triangle_mesh() -> Mesh {
        let mut g = Geometry::new();
        g.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (1.0, 0.0));
        g.push_vertex(Point3::new(0.5, 1.0, 0.0), Vector3::z(), (0.5, 1.0));
        g.indices.extend([0, 1, 2]);
        g.rebuild();
        Mesh::new("tri", "Triangle", g)
    }

    #[test]
    fn zero_iterations_is_noop() {
        let mesh = triangle_mesh();
        let out = subdivide(&mesh, &SubdivideParams::new(0));
        assert_eq!(out.geometry, mesh.geometry);
    }

    #[test]
    fn one_pass_quadruples_triangles() {
        let mesh = triangle_mesh();
        let out = subdivide(&mesh, &SubdivideParams::new(1));
        assert_eq!(out.geometry.triangle_count(), 4);
        // 3 original + 3 midpoints
        assert_eq!(out.geometry.vertex_count(), 6);
        assert!(out.geometry.validate().is_ok());
    }

    #[test]
    fn two_passes_give_sixteen() {
        let mesh = triangle_mesh();
        let out = subdivide(&mesh, &SubdivideParams::new(2));
        assert_eq!(out.geometry.triangle_count(), 16);
    }

    #[test]
    fn shared_edges_share_midpoints() {
        let cube = Mesh::new("cube", "Cube", unit_cube());
        let out = subdivide(&cube, &SubdivideParams::new(1));
        // 8 original vertices + 18 unique edges = 26.
        assert_eq!(out.geometry.vertex_count(), 26);
        assert_eq!(out.geometry.triangle_count(), 48);
    }

    #[test]
    fn faceted_cube_keeps_midpoints_per_face() {
        // A cube whose faces do not share vertices: 24 vertices, 12
        // triangles. One pass adds three midpoints per original vertex
        // group with no cross-face dedup.
        let mut g = Geometry::new();
        let faces: [([f32; 3], [f32; 3], [f32; 3], [f32; 3]); 6] = [
            // -z
            ([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            // +z
            ([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]),
            // -y
            ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
            // +y
            ([0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]),
            // -x
            ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
            // +x
            ([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]),
        ];
        for (a, b, c, d) in faces {
            let base = g.vertex_count() as u32;
            for p in [a, b, c, d] {
                g.push_vertex(Point3::new(p[0], p[1], p[2]), Vector3::zeros(), (0.0, 0.0));
            }
            g.indices.extend([base, base + 1, base + 2]);
            g.indices.extend([base, base + 2, base + 3]);
        }
        g.recompute_vertex_normals();
        g.rebuild();
        assert_eq!(g.vertex_count(), 24);

        let out = subdivide(&Mesh::new("cube", "Cube", g), &SubdivideParams::new(1));
        // Each face has 5 unique edges (the diagonal is shared between
        // its two triangles): 24 + 6 * 5 = 54 vertices, none shared
        // across faces.
        assert_eq!(out.geometry.vertex_count(), 54);
        assert_eq!(out.geometry.triangle_count(), 48);
    }

    #[test]
    fn midpoints_interpolate_attributes() {
        let mesh = triangle_mesh();
        let out = subdivide(&mesh, &SubdivideParams::new(1));
        // First midpoint is on edge (0, 1).
        let p = out.geometry.position(3);
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-6);
        let n = out.geometry.normal(3);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        let (u, _) = out.geometry.uv(3);
        assert_relative_eq!(u, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn smoothing_pulls_cube_corners_inward(){
        let cube = Mesh::new("cube", "Cube", unit_cube());
        let out = subdivide(&cube, &SubdivideParams::new(1).with_smooth(true));
        // Corner vertices contract toward the surface: the unrelaxed
        // corner sits at norm sqrt(0.75) ~ 0.866.
        let corner = out.geometry.position(0);
        assert!(corner.coords.norm() < 0.8);
        assert_eq!(out.geometry.triangle_count(), 48);
    }
}
