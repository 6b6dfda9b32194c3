//! Region extrusion over a face selection.

use hashbrown::{HashMap, HashSet};
use nalgebra::Vector3;
use poly_types::{Edge, Mesh};

use crate::params::ExtrudeParams;

/// Extrude the selected triangles of a mesh.
///
/// Selected faces are lifted onto cloned vertices displaced by
/// `distance`; side quads are stitched along edges of the selection
/// that are not shared with another selected face. An empty selection
/// returns the input unchanged.
#[must_use]
pub fn extrude_faces(mesh: &Mesh, faces: &[usize], params: &ExtrudeParams) -> Mesh {
    let selected: HashSet<usize> = faces
        .iter()
        .copied()
        .filter(|&f| f < mesh.geometry.triangle_count())
        .collect();
    if selected.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();

    // Union of selected vertex indices.
    let mut selected_vertices: HashSet<u32> = HashSet::new();
    for &f in &selected {
        selected_vertices.extend(geometry.triangle(f));
    }

    // Average selection normal, used unless per-vertex normals are requested.
    let mut average = Vector3::zeros();
    for &f in &selected {
        average += geometry.faces[f].normal;
    }
    let average = if average.norm() < 1e-12 {
        Vector3::z()
    } else {
        average.normalize()
    };

    // Clone each selected vertex once, displaced along its normal.
    let mut clones: HashMap<u32, u32> = HashMap::with_capacity(selected_vertices.len());
    for &v in &selected_vertices {
        let direction = if params.use_normals {
            geometry.normal(v)
        } else {
            average
        };
        let position = geometry.position(v) + direction * params.distance;
        let clone = geometry.push_vertex(position, geometry.normal(v), geometry.uv(v));
        clones.insert(v, clone);
    }

    // Lift the selected faces onto the clones.
    for &f in &selected {
        for k in 0..3 {
            let idx = f * 3 + k;
            let v = geometry.indices[idx];
            geometry.indices[idx] = clones[&v];
        }
    }

    // Boundary edges of the selection: sides not shared between two
    // selected faces. Count over canonical keys, emit with the directed
    // order taken from the owning face so the quads wind outward.
    let mut edge_count: HashMap<Edge, u32> = HashMap::new();
    let mut directed: Vec<(u32, u32)> = Vec::new();
    for &f in &selected {
        let tri = mesh.geometry.triangle(f);
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *edge_count.entry(Edge::new(a, b)).or_insert(0) += 1;
            directed.push((a, b));
        }
    }

    for (a, b) in directed {
        if edge_count[&Edge::new(a, b)] != 1 {
            continue;
        }
        let a_clone = clones[&a];
        let b_clone = clones[&b];
        geometry.indices.extend([a, b, b_clone]);
        geometry.indices.extend([a, b_clone, a_clone]);
    }

    geometry.rebuild();
    mesh.with_geometry(geometry)
}
