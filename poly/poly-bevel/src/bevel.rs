//! Chamfer construction.

use hashbrown::{HashMap, HashSet};
use poly_types::{Edge, Mesh};

use crate::params::BevelParams;

/// Bevel the selected edges of a mesh.
///
/// An empty selection, or a selection with no adjacent faces, returns
/// the input unchanged.
#[must_use]
pub fn bevel_edges(mesh: &Mesh, edges: &[Edge], params: &BevelParams) -> Mesh {
    if edges.is_empty() || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();

    // Edge -> adjacent face indices over the whole mesh.
    let mut adjacency: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (f, tri) in mesh.geometry.triangles().enumerate() {
        for k in 0..3 {
            adjacency
                .entry(Edge::new(tri[k], tri[(k + 1) % 3]))
                .or_default()
                .push(f);
        }
    }

    let selected: HashSet<Edge> = edges.iter().copied().collect();

    // First clone per original endpoint (reroute target), and one
    // ribbon record per (edge, adjacent face).
    let mut first_clone: HashMap<u32, u32> = HashMap::new();
    let mut ribbons: Vec<(u32, u32, u32, u32)> = Vec::new();

    for &edge in &selected {
        let Some(faces) = adjacency.get(&edge) else {
            continue;
        };

        let pa = geometry.position(edge.a);
        let pb = geometry.position(edge.b);
        let along = pb - pa;
        if along.norm() < 1e-12 {
            continue;
        }
        let edge_dir = along.normalize();

        for &f in faces {
            let face_normal = mesh.geometry.triangle_normal(f);
            let perp = edge_dir.cross(&face_normal);
            if perp.norm() < 1e-12 {
                continue;
            }
            let offset = perp.normalize() * params.amount;

            let clone_a = geometry.push_vertex(
                geometry.position(edge.a) + offset,
                geometry.normal(edge.a),
                geometry.uv(edge.a),
            );
            let clone_b = geometry.push_vertex(
                geometry.position(edge.b) + offset,
                geometry.normal(edge.b),
                geometry.uv(edge.b),
            );
            first_clone.entry(edge.a).or_insert(clone_a);
            first_clone.entry(edge.b).or_insert(clone_b);
            ribbons.push((edge.a, edge.b, clone_a, clone_b));
        }
    }

    if ribbons.is_empty() {
        return mesh.clone();
    }

    // Reroute every triangle referencing an original endpoint to its
    // first clone.
    for idx in &mut geometry.indices {
        if let Some(&clone) = first_clone.get(idx) {
            *idx = clone;
        }
    }

    // Ribbon quads bridging originals to clones.
    for (a, b, clone_a, clone_b) in ribbons {
        geometry.indices.extend([a, b, clone_b]);
        geometry.indices.extend([a, clone_b, clone_a]);
    }

    geometry.rebuild();
    mesh.with_geometry(geometry)
}
