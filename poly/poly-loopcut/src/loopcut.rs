//! Loop cut retriangulation.

use hashbrown::HashMap;
use nalgebra::Vector3;
use poly_types::{Edge, Geometry, Mesh};

use crate::params::LoopCutParams;

/// Cut the selected edges and retriangulate the affected triangles.
///
/// Each selected edge gains `cuts` vertices at `t = k / (cuts + 1)`,
/// created once per canonical edge so adjacent triangles stay stitched.
/// Zero cuts or an empty selection returns the input unchanged.
#[must_use]
pub fn loop_cut(mesh: &Mesh, edges: &[Edge], params: &LoopCutParams) -> Mesh {
    if params.cuts == 0 || edges.is_empty() || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();

    // Cut vertices per canonical edge, ordered from edge.a to edge.b.
    let mut cut_map: HashMap<Edge, Vec<u32>> = HashMap::with_capacity(edges.len());
    for &edge in edges {
        if edge.a == edge.b || edge.b as usize >= geometry.vertex_count() {
            continue;
        }
        cut_map.entry(edge).or_insert_with(|| {
            make_cut_vertices(&mut geometry, edge, params.cuts)
        });
    }
    if cut_map.is_empty() {
        return mesh.clone();
    }

    let mut new_indices = Vec::with_capacity(geometry.indices.len() * 2);

    for tri in mesh.geometry.triangles() {
        let cut_sides: Vec<usize> = (0..3)
            .filter(|&k| cut_map.contains_key(&Edge::new(tri[k], tri[(k + 1) % 3])))
            .collect();

        match cut_sides.len() {
            1 => {
                let k = cut_sides[0];
                fan_one_cut(&tri, k, &cut_map, &mut new_indices);
            }
            2 => {
                strip_two_cuts(&tri, (cut_sides[0], cut_sides[1]), &cut_map, &mut new_indices);
            }
            // Zero cuts, or all three sides cut (kept as a known
            // limitation): the original triangle survives.
            _ => new_indices.extend(tri),
        }
    }

    geometry.indices = new_indices;
    geometry.rebuild();
    mesh.with_geometry(geometry)
}

/// Insert `cuts` interpolated vertices along a canonical edge.
fn make_cut_vertices(geometry: &mut Geometry, edge: Edge, cuts: u32) -> Vec<u32> {
    let p0 = geometry.position(edge.a);
    let p1 = geometry.position(edge.b);
    let n0 = geometry.normal(edge.a);
    let n1 = geometry.normal(edge.b);
    let (u0, v0) = geometry.uv(edge.a);
    let (u1, v1) = geometry.uv(edge.b);

    (1..=cuts)
        .map(|k| {
            let t = k as f32 / (cuts + 1) as f32;
            let position = p0 + (p1 - p0) * t;
            let normal = n0 + (n1 - n0) * t;
            let normal = if normal.norm() < 1e-12 {
                Vector3::zeros()
            } else {
                normal.normalize()
            };
            let uv = (u0 + (u1 - u0) * t, v0 + (v1 - v0) * t);
            geometry.push_vertex(position, normal, uv)
        })
        .collect()
}

/// The cut list for side `k` of a triangle, oriented to follow the
/// triangle's winding (the canonical list runs `a -> b`).
fn oriented_cuts(tri: &[u32; 3], k: usize, cut_map: &HashMap<Edge, Vec<u32>>) -> Vec<u32> {
    let p = tri[k];
    let q = tri[(k + 1) % 3];
    let edge = Edge::new(p, q);
    let mut list = cut_map[&edge].clone();
    if p != edge.a {
        list.reverse();
    }
    list
}

/// One cut side: fan from the opposite vertex through `[p, c.., q]`.
fn fan_one_cut(
    tri: &[u32; 3],
    k: usize,
    cut_map: &HashMap<Edge, Vec<u32>>,
    out: &mut Vec<u32>,
) {
    let p = tri[k];
    let q = tri[(k + 1) % 3];
    let opposite = tri[(k + 2) % 3];

    let mut sequence = vec![p];
    sequence.extend(oriented_cuts(tri, k, cut_map));
    sequence.push(q);

    for pair in sequence.windows(2) {
        out.extend([pair[0], pair[1], opposite]);
    }
}

/// Two cut sides sharing a vertex: a tip triangle at the shared vertex,
/// quads between corresponding cut pairs, and a base band joining the
/// last cuts to the unshared vertices.
fn strip_two_cuts(
    tri: &[u32; 3],
    sides: (usize, usize),
    cut_map: &HashMap<Edge, Vec<u32>>,
    out: &mut Vec<u32>,
) {
    // Rotate the triangle so it reads (s, a, b) with the cut sides
    // being (s, a) and (b, s); cyclic rotation preserves winding.
    let rotation = match sides {
        (0, 2) => 0, // shared vertex v0
        (0, 1) => 1, // shared vertex v1
        (1, 2) => 2, // shared vertex v2
        _ => {
            out.extend(*tri);
            return;
        }
    };
    let rotated = [
        tri[rotation],
        tri[(rotation + 1) % 3],
        tri[(rotation + 2) % 3],
    ];
    let [s, a, b] = rotated;

    // Both lists oriented away from the shared vertex.
    let list_a = oriented_cuts(&rotated, 0, cut_map); // side (s, a)
    let list_b = {
        let mut l = oriented_cuts(&rotated, 2, cut_map); // side (b, s), runs b -> s
        l.reverse();
        l
    };

    out.extend([s, list_a[0], list_b[0]]);

    for j in 0..list_a.len() - 1 {
        out.extend([list_a[j], list_a[j + 1], list_b[j + 1]]);
        out.extend([list_a[j], list_b[j + 1], list_b[j]]);
    }

    let last_a = list_a[list_a.len() - 1];
    let last_b = list_b[list_b.len() - 1];
    out.extend([last_a, a, b]);
    out.extend([last_a, b, last_b]);
}
