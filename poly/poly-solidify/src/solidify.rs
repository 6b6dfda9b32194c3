//! Shell and rim construction.

use hashbrown::HashMap;
use nalgebra::Vector3;
use poly_types::{Edge, Geometry, Mesh};

use crate::params::SolidifyParams;

/// Solidify a surface into a closed wall of the given thickness.
#[must_use]
pub fn solidify(mesh: &Mesh, params: &SolidifyParams) -> Mesh {
    if mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let source = &mesh.geometry;
    let vertex_count = source.vertex_count();

    let directions = if params.even_thickness {
        even_normals(source)
    } else {
        (0..vertex_count as u32).map(|v| source.normal(v)).collect()
    };

    let outer_distance = params.thickness * (params.offset + 1.0) * 0.5;
    let inner_distance = params.thickness * (params.offset - 1.0) * 0.5;

    let mut out = Geometry::with_capacity(vertex_count * 2, source.triangle_count() * 2);

    // Outer shell keeps the source winding and normals.
    for v in 0..vertex_count as u32 {
        out.push_vertex(
            source.position(v) + directions[v as usize] * outer_distance,
            source.normal(v),
            source.uv(v),
        );
    }
    out.indices.extend_from_slice(&source.indices);

    // Inner shell: displaced the other way, reversed winding, negated
    // normals.
    let inner_base = vertex_count as u32;
    for v in 0..vertex_count as u32 {
        out.push_vertex(
            source.position(v) + directions[v as usize] * inner_distance,
            -source.normal(v),
            source.uv(v),
        );
    }
    for tri in source.triangles() {
        out.indices.extend([
            tri[0] + inner_base,
            tri[2] + inner_base,
            tri[1] + inner_base,
        ]);
    }

    if params.fill_rim {
        fill_rim(source, &mut out, inner_base, &directions);
    }

    out.rebuild();
    mesh.with_geometry(out)
}

/// Per-vertex displacement directions as the normalised sum of incident
/// geometric face normals.
fn even_normals(geometry: &Geometry) -> Vec<Vector3<f32>> {
    let mut sums = vec![Vector3::zeros(); geometry.vertex_count()];

    for t in 0..geometry.triangle_count() {
        let normal = geometry.triangle_normal(t);
        for &v in &geometry.triangle(t) {
            sums[v as usize] += normal;
        }
    }

    sums.into_iter()
        .map(|sum| {
            let len = sum.norm();
            if len < 1e-12 { Vector3::zeros() } else { sum / len }
        })
        .collect()
}

/// Close each boundary edge with a quad of four fresh vertices
/// spanning the outer and inner shells.
fn fill_rim(
    source: &Geometry,
    out: &mut Geometry,
    inner_base: u32,
    directions: &[Vector3<f32>],
) {
    // Count canonical edges but remember the directed orientation and
    // owning triangle of each, so rim quads wind with the surface.
    let mut edge_count: HashMap<Edge, u32> = HashMap::new();
    let mut directed: Vec<(u32, u32, usize)> = Vec::new();

    for (t, tri) in source.triangles().enumerate() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *edge_count.entry(Edge::new(a, b)).or_insert(0) += 1;
            directed.push((a, b, t));
        }
    }

    for (a, b, t) in directed {
        if edge_count[&Edge::new(a, b)] != 1 {
            continue;
        }

        let edge_vec = out.position(b) - out.position(a);
        let face_normal = source.triangle_normal(t);
        let rim_normal = {
            let n = edge_vec.cross(&face_normal);
            let len = n.norm();
            if len < 1e-12 {
                (directions[a as usize] + directions[b as usize]) * 0.5
            } else {
                n / len
            }
        };

        let corners = [
            (out.position(a), (0.0, 0.0)),
            (out.position(b), (1.0, 0.0)),
            (out.position(b + inner_base), (1.0, 1.0)),
            (out.position(a + inner_base), (0.0, 1.0)),
        ];
        let base = out.vertex_count() as u32;
        for (position, uv) in corners {
            out.push_vertex(position, rim_normal, uv);
        }

        out.indices.extend([base, base + 1, base + 2]);
        out.indices.extend([base, base + 2, base + 3]);
    }
}
