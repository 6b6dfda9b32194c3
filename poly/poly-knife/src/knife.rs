//! Knife cut collection and retriangulation.

use nalgebra::{Point3, Vector3};
use poly_pick::segment_triangle;
use poly_types::{Geometry, Mesh};
use smallvec::SmallVec;
use tracing::debug;

use crate::params::KnifeParams;

/// How far a through cut extends each stroke segment past its ends.
const THROUGH_EXTENSION: f32 = 1000.0;

/// Barycentric weight above which a hit counts as "on a vertex" and is
/// rejected.
const NEAR_VERTEX: f32 = 0.95;

/// One recorded cut: the triangle side to split and the parameter
/// along its directed run.
#[derive(Debug, Clone, Copy)]
struct EdgeCut {
    slot: usize,
    t: f32,
}

/// Cut a mesh along a world-space polyline.
///
/// A path of fewer than two points is a no-op. Triangles collecting
/// more than two cuts, or two cuts on the same side, are kept as-is.
#[must_use]
pub fn knife(mesh: &Mesh, path: &[Point3<f32>], params: &KnifeParams) -> Mesh {
    if path.len() < 2 || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let source = &mesh.geometry;
    let mut cuts: Vec<SmallVec<[EdgeCut; 2]>> =
        vec![SmallVec::new(); source.triangle_count()];

    for segment in path.windows(2) {
        let (start, end) = if params.through_cut {
            let direction = segment[1] - segment[0];
            let norm = direction.norm();
            if norm < 1e-12 {
                continue;
            }
            let direction = direction / norm;
            (
                segment[0] - direction * THROUGH_EXTENSION,
                segment[1] + direction * THROUGH_EXTENSION,
            )
        } else {
            (segment[0], segment[1])
        };

        for (t, tri) in source.triangles().enumerate() {
            let v0 = source.position(tri[0]);
            let v1 = source.position(tri[1]);
            let v2 = source.position(tri[2]);

            let Some(hit) = segment_triangle(start, end, v0, v1, v2) else {
                continue;
            };
            let Some(cut) = choose_edge(hit.u, hit.v) else {
                continue;
            };

            // Drop repeats of the same crossing (e.g. overlapping
            // stroke segments).
            let duplicate = cuts[t]
                .iter()
                .any(|c| c.slot == cut.slot && (c.t - cut.t).abs() < 1e-5);
            if !duplicate {
                cuts[t].push(cut);
            }
        }
    }

    let total: usize = cuts.iter().map(SmallVec::len).sum();
    if total == 0 {
        return mesh.clone();
    }
    debug!(cuts = total, "knife stroke recorded");

    let mut geometry = source.clone();
    let mut new_indices = Vec::with_capacity(source.indices.len() * 2);

    for (t, tri) in source.triangles().enumerate() {
        match cuts[t].as_slice() {
            [] => new_indices.extend(tri),
            [cut] => split_one(&mut geometry, &tri, *cut, &mut new_indices),
            [first, second] if first.slot != second.slot => {
                split_two(&mut geometry, &tri, *first, *second, &mut new_indices);
            }
            // Two cuts on one side, or three or more cuts: keep the
            // triangle (known limitation).
            _ => new_indices.extend(tri),
        }
    }

    geometry.indices = new_indices;
    geometry.rebuild();
    mesh.with_geometry(geometry)
}

/// Cut a mesh with the silhouette of another mesh's edges.
///
/// Every edge of the projected geometry contributes its endpoints to a
/// polyline which is then cut through the target.
#[must_use]
pub fn knife_project(mesh: &Mesh, projected: &Geometry) -> Mesh {
    let mut path = Vec::with_capacity(projected.edges.len() * 2);
    for edge in &projected.edges {
        path.push(projected.position(edge.a));
        path.push(projected.position(edge.b));
    }
    knife(mesh, &path, &KnifeParams::through())
}

/// Pick the triangle side to split from a hit's barycentrics.
///
/// Rejects near-vertex hits, then takes the side whose opposite
/// barycentric weight is smallest (lowest side index on ties). The
/// parameter along side `(i, j)` is `b_i / (b_i + b_j)`.
fn choose_edge(u: f32, v: f32) -> Option<EdgeCut> {
    let bary = [1.0 - u - v, u, v];
    if bary.iter().any(|&b| b > NEAR_VERTEX) {
        return None;
    }

    // Opposite weights: side 0 = (v0, v1) faces b2, side 1 = (v1, v2)
    // faces b0, side 2 = (v2, v0) faces b1.
    let opposite = [bary[2], bary[0], bary[1]];
    let mut slot = 0;
    for k in 1..3 {
        if opposite[k] < opposite[slot] {
            slot = k;
        }
    }

    let i = bary[slot];
    let j = bary[(slot + 1) % 3];
    if i + j < 1e-12 {
        return None;
    }
    Some(EdgeCut {
        slot,
        t: i / (i + j),
    })
}

/// Interpolate a fresh vertex along a directed triangle side.
fn side_vertex(geometry: &mut Geometry, p: u32, q: u32, t: f32) -> u32 {
    let position = geometry.position(p) + (geometry.position(q) - geometry.position(p)) * t;
    let normal = {
        let n = geometry.normal(p) + (geometry.normal(q) - geometry.normal(p)) * t;
        let len = n.norm();
        if len < 1e-12 { Vector3::zeros() } else { n / len }
    };
    let (u0, v0) = geometry.uv(p);
    let (u1, v1) = geometry.uv(q);
    geometry.push_vertex(position, normal, (u0 + (u1 - u0) * t, v0 + (v1 - v0) * t))
}

/// One cut: two triangles around the vertex opposite the cut side.
fn split_one(geometry: &mut Geometry, tri: &[u32; 3], cut: EdgeCut, out: &mut Vec<u32>) {
    let p = tri[cut.slot];
    let q = tri[(cut.slot + 1) % 3];
    let opposite = tri[(cut.slot + 2) % 3];
    let c = side_vertex(geometry, p, q, cut.t);
    out.extend([p, c, opposite]);
    out.extend([c, q, opposite]);
}

/// Two cuts on sides sharing a vertex: three triangles around the
/// shared vertex and the two cut vertices.
fn split_two(
    geometry: &mut Geometry,
    tri: &[u32; 3],
    first: EdgeCut,
    second: EdgeCut,
    out: &mut Vec<u32>,
) {
    let slots = if first.slot < second.slot {
        (first.slot, second.slot)
    } else {
        (second.slot, first.slot)
    };
    // Rotate the triangle to read (s, a, b) with the cut sides being
    // (s, a) and (b, s); cyclic rotation preserves winding.
    let rotation = match slots {
        (0, 2) => 0,
        (0, 1) => 1,
        (1, 2) => 2,
        _ => {
            out.extend(*tri);
            return;
        }
    };
    let s = tri[rotation];
    let a = tri[(rotation + 1) % 3];
    let b = tri[(rotation + 2) % 3];

    let cut_on = |slot: usize, cuts: [EdgeCut; 2]| {
        cuts.into_iter().find(|c| c.slot == slot)
    };
    let pair = [first, second];
    let Some(cut_sa) = cut_on(rotation, pair) else {
        out.extend(*tri);
        return;
    };
    let Some(cut_bs) = cut_on((rotation + 2) % 3, pair) else {
        out.extend(*tri);
        return;
    };

    // c1 along s -> a; c2 along b -> s (the side's directed run).
    let c1 = side_vertex(geometry, s, a, cut_sa.t);
    let c2 = side_vertex(geometry, b, s, cut_bs.t);

    out.extend([s, c1, c2]);
    out.extend([c1, a, b]);
    out.extend([c1, b, c2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use poly_types::Triangle;

    fn unit_quad() -> Mesh {
        let mut g = Geometry::new();
        g.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (1.0, 0.0));
        g.push_vertex(Point3::new(1.0, 1.0, 0.0), Vector3::z(), (1.0, 1.0));
        g.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z(), (0.0, 1.0));
        g.indices.extend([0, 1, 2, 0, 2, 3]);
        g.rebuild();
        Mesh::new("quad", "Quad", g)
    }

    fn total_area(g: &Geometry) -> f32 {
        (0..g.triangle_count())
            .map(|t| {
                let [a, b, c] = g.triangle(t);
                Triangle::new(g.position(a), g.position(b), g.position(c)).area()
            })
            .sum()
    }

    #[test]
    fn short_path_is_noop() {
        let mesh = unit_quad();
        let out = knife(&mesh, &[Point3::origin()], &KnifeParams::default());
        assert_eq!(out.geometry, mesh.geometry);
    }

    #[test]
    fn piercing_stroke_splits_both_triangles() {
        let mesh = unit_quad();
        // Pierces the surface at (0.5, 0.5, 0), on the shared diagonal.
        let path = [
            Point3::new(0.2, 0.6, 1.0),
            Point3::new(0.8, 0.4, -1.0),
        ];
        let out = knife(&mesh, &path, &KnifeParams::default());

        assert!(out.geometry.triangle_count() >= 4);
        // Each pierced triangle splits its own copy of the diagonal.
        let new_on_diagonal = (4..out.geometry.vertex_count() as u32)
            .filter(|&v| {
                let p = out.geometry.position(v);
                (p.x - p.y).abs() < 1e-4
            })
            .count();
        assert!(new_on_diagonal >= 2);
        assert_relative_eq!(
            total_area(&out.geometry),
            total_area(&mesh.geometry),
            epsilon = 1e-5
        );
    }

    #[test]
    fn through_cut_extends_short_strokes() {
        let mesh = unit_quad();
        // Too short to reach the surface unless extended; the extended
        // line pierces at (0.75, 0.25, 0).
        let path = [
            Point3::new(0.45, 0.55, 3.0),
            Point3::new(0.55, 0.45, 2.0),
        ];
        let missed = knife(&mesh, &path, &KnifeParams::default());
        assert_eq!(missed.geometry.triangle_count(), 2);

        let cut = knife(&mesh, &path, &KnifeParams::through());
        assert!(cut.geometry.triangle_count() > 2);
    }

    #[test]
    fn near_vertex_hits_are_rejected() {
        let mesh = unit_quad();
        // Pierces almost exactly at vertex 0.
        let path = [
            Point3::new(0.01, 0.011, 1.0),
            Point3::new(0.01, 0.009, -1.0),
        ];
        let out = knife(&mesh, &path, &KnifeParams::default());
        assert_eq!(out.geometry.triangle_count(), 2);
    }

    #[test]
    fn knife_project_uses_projected_edges() {
        let mesh = unit_quad();
        // A tiny vertical triangle above the quad: its edges pierce it.
        let mut blade = Geometry::new();
        blade.push_vertex(Point3::new(0.3, 0.6, 1.0), Vector3::x(), (0.0, 0.0));
        blade.push_vertex(Point3::new(0.7, 0.4, -1.0), Vector3::x(), (1.0, 0.0));
        blade.push_vertex(Point3::new(0.5, 0.5, 1.0), Vector3::x(), (0.5, 1.0));
        blade.indices.extend([0, 1, 2]);
        blade.rebuild();

        let out = knife_project(&mesh, &blade);
        assert!(out.geometry.triangle_count() > 2);
        assert!(out.geometry.validate().is_ok());
    }

    #[test]
    fn interior_hit_splits_nearest_edge() {
        let mesh = unit_quad();
        // Pierces the lower triangle at (0.6, 0.2): nearest side is the
        // bottom edge, split at its midpoint.
        let path = [
            Point3::new(0.6, 0.2, 1.0),
            Point3::new(0.6, 0.2, -1.0),
        ];
        let out = knife(&mesh, &path, &KnifeParams::default());
        assert_eq!(out.geometry.triangle_count(), 3);
        let c = out.geometry.position(4);
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn two_hits_on_adjacent_sides_make_three_triangles() {
        let mesh = unit_quad();
        // Two piercings of the lower triangle: one near the bottom
        // edge, one near the right edge. The cut sides share vertex 1.
        let path = [
            Point3::new(0.5, 0.1, 1.0),
            Point3::new(0.5, 0.1, -1.0),
            Point3::new(0.8, 0.5, -1.0),
            Point3::new(0.8, 0.5, 1.0),
        ];
        let out = knife(&mesh, &path, &KnifeParams::default());
        // Lower triangle becomes 3; upper keeps 1. The middle stroke
        // segment runs parallel below the surface and hits nothing.
        assert!(out.geometry.triangle_count() >= 4);
        assert_relative_eq!(
            total_area(&out.geometry),
            total_area(&mesh.geometry),
            epsilon = 1e-5
        );
        assert!(out.geometry.validate().is_ok());
    }
}
