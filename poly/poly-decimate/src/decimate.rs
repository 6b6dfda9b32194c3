//! Edge-collapse decimation loop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use poly_types::{Edge, Geometry, Mesh};
use tracing::{debug, info};

use crate::params::DecimateParams;
use crate::quadric::Quadric;
use crate::result::DecimationResult;

/// Decimation never reduces a mesh below this many triangles.
const MIN_TRIANGLES: usize = 4;

/// An edge collapse candidate in the priority queue.
#[derive(Debug, Clone, Copy)]
struct EdgeCollapse {
    v1: u32,
    v2: u32,
    cost: f32,
}

impl PartialEq for EdgeCollapse {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for EdgeCollapse {}

impl PartialOrd for EdgeCollapse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeCollapse {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (smaller cost pops first).
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

/// Decimate a mesh toward `floor(triangles * ratio)` triangles.
///
/// A ratio at or above one, or an empty mesh, is a no-op. Collapsed
/// vertices merge at the edge midpoint; the result's vertex normals
/// are recomputed from the surviving faces.
#[must_use]
pub fn decimate(mesh: &Mesh, params: &DecimateParams) -> DecimationResult {
    let original_triangles = mesh.geometry.triangle_count();

    let noop = |count| DecimationResult {
        mesh: mesh.clone(),
        original_triangles: count,
        final_triangles: count,
        collapses_performed: 0,
        collapses_skipped: 0,
    };

    if original_triangles == 0 || params.ratio >= 1.0 {
        return noop(original_triangles);
    }

    let target =
        (((original_triangles as f32) * params.ratio).floor() as usize).max(MIN_TRIANGLES);
    if original_triangles <= target {
        return noop(original_triangles);
    }

    info!(
        original = original_triangles,
        target = target,
        mode = ?params.mode,
        "starting decimation"
    );

    let source = &mesh.geometry;
    let vertex_count = source.vertex_count();

    let mut positions: Vec<Point3<f32>> =
        (0..vertex_count as u32).map(|v| source.position(v)).collect();
    let mut alive = vec![true; vertex_count];
    let mut faces: Vec<Option<[u32; 3]>> = source.triangles().map(Some).collect();
    let mut active_faces = original_triangles;

    let mut quadrics = compute_vertex_quadrics(source);

    // Initial candidate queue over the unique edge set.
    let mut heap: BinaryHeap<EdgeCollapse> = BinaryHeap::new();
    let mut seen: HashSet<Edge> = HashSet::new();
    for face in faces.iter().flatten() {
        for k in 0..3 {
            let edge = Edge::new(face[k], face[(k + 1) % 3]);
            if seen.insert(edge) {
                heap.push(candidate(edge.a, edge.b, &positions, &quadrics));
            }
        }
    }

    // Merged vertices chain to their survivor.
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let resolve = |mut v: u32, remap: &HashMap<u32, u32>| {
        while let Some(&next) = remap.get(&v) {
            v = next;
        }
        v
    };

    let mut collapses_performed = 0;
    let mut collapses_skipped = 0;

    while active_faces > target {
        let Some(collapse) = heap.pop() else {
            break;
        };

        let v1 = resolve(collapse.v1, &remap);
        let v2 = resolve(collapse.v2, &remap);
        if v1 == v2 || !alive[v1 as usize] || !alive[v2 as usize] {
            collapses_skipped += 1;
            continue;
        }

        // Merge v2 into v1 at the current midpoint.
        positions[v1 as usize] = nalgebra::center(&positions[v1 as usize], &positions[v2 as usize]);
        let q2 = quadrics[v2 as usize];
        quadrics[v1 as usize].add(&q2);
        alive[v2 as usize] = false;
        remap.insert(v2, v1);

        // Rewrite faces through the remap and drop collapsed ones.
        for face in &mut faces {
            let Some(indices) = face else { continue };
            for idx in indices.iter_mut() {
                *idx = resolve(*idx, &remap);
            }
            if indices[0] == indices[1] || indices[1] == indices[2] || indices[0] == indices[2] {
                *face = None;
                active_faces -= 1;
            }
        }

        collapses_performed += 1;

        // Refresh candidates around the merged vertex.
        let mut neighbours: HashSet<u32> = HashSet::new();
        for face in faces.iter().flatten() {
            if face.contains(&v1) {
                for &v in face {
                    if v != v1 {
                        neighbours.insert(v);
                    }
                }
            }
        }
        for &n in &neighbours {
            heap.push(candidate(v1, n, &positions, &quadrics));
        }
    }

    let geometry = build_final_geometry(source, &positions, &alive, &faces);
    debug!(
        vertices = geometry.vertex_count(),
        triangles = geometry.triangle_count(),
        "built decimated geometry"
    );

    info!(
        final_triangles = active_faces,
        collapses = collapses_performed,
        "decimation complete"
    );

    DecimationResult {
        mesh: mesh.with_geometry(geometry),
        original_triangles,
        final_triangles: active_faces,
        collapses_performed,
        collapses_skipped,
    }
}

/// Price an edge collapse at the segment midpoint.
fn candidate(v1: u32, v2: u32, positions: &[Point3<f32>], quadrics: &[Quadric]) -> EdgeCollapse {
    let mut combined = quadrics[v1 as usize];
    combined.add(&quadrics[v2 as usize]);
    let mid = nalgebra::center(&positions[v1 as usize], &positions[v2 as usize]);
    EdgeCollapse {
        v1,
        v2,
        cost: combined.evaluate(mid.x, mid.y, mid.z),
    }
}

/// Accumulate the plane quadric of every face onto its three vertices.
fn compute_vertex_quadrics(geometry: &Geometry) -> Vec<Quadric> {
    let mut quadrics = vec![Quadric::default(); geometry.vertex_count()];

    for t in 0..geometry.triangle_count() {
        let normal = geometry.triangle_normal(t);
        if normal.norm() < 0.5 {
            // Degenerate face contributes no plane.
            continue;
        }
        let tri = geometry.triangle(t);
        let v0 = geometry.position(tri[0]);
        let d = -(normal.x * v0.x + normal.y * v0.y + normal.z * v0.z);
        let q = Quadric::from_plane(normal.x, normal.y, normal.z, d);

        for &v in &tri {
            quadrics[v as usize].add(&q);
        }
    }

    quadrics
}

/// Compact surviving vertices and faces into fresh buffers with
/// recomputed normals.
fn build_final_geometry(
    source: &Geometry,
    positions: &[Point3<f32>],
    alive: &[bool],
    faces: &[Option<[u32; 3]>],
) -> Geometry {
    let mut compact: HashMap<u32, u32> = HashMap::new();
    let mut out = Geometry::with_capacity(alive.len(), faces.len());

    for (v, &is_alive) in alive.iter().enumerate() {
        if is_alive {
            let idx = out.push_vertex(
                positions[v],
                nalgebra::Vector3::zeros(),
                source.uv(v as u32),
            );
            compact.insert(v as u32, idx);
        }
    }

    for face in faces.iter().flatten() {
        if let (Some(&i0), Some(&i1), Some(&i2)) = (
            compact.get(&face[0]),
            compact.get(&face[1]),
            compact.get(&face[2]),
        ) {
            out.indices.extend([i0, i1, i2]);
        }
    }

    out.recompute_vertex_normals();
    out.rebuild();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DecimateMode;
    use poly_types::unit_cube;

    fn cube_mesh() -> Mesh {
        Mesh::new("cube", "Cube", unit_cube())
    }

    #[test]
    fn empty_mesh_is_noop() {
        let mesh = Mesh::new("empty", "Empty", Geometry::new());
        let result = decimate(&mesh, &DecimateParams::default());
        assert_eq!(result.original_triangles, 0);
        assert_eq!(result.collapses_performed, 0);
    }

    #[test]
    fn ratio_one_is_noop() {
        let mesh = cube_mesh();
        let result = decimate(&mesh, &DecimateParams::with_target_ratio(1.0));
        assert_eq!(result.mesh.geometry, mesh.geometry);
        assert_eq!(result.final_triangles, 12);
    }

    #[test]
    fn ratio_zero_hits_the_floor() {
        let mesh = cube_mesh();
        let result = decimate(&mesh, &DecimateParams::with_target_ratio(0.0));
        assert_eq!(result.final_triangles, 4);
        assert_eq!(result.mesh.geometry.triangle_count(), 4);
        assert!(result.mesh.geometry.validate().is_ok());
    }

    #[test]
    fn half_ratio_halves_the_cube() {
        let mesh = cube_mesh();
        let result = decimate(&mesh, &DecimateParams::with_target_ratio(0.5));
        assert!(result.final_triangles <= 6);
        assert!(result.final_triangles >= 4);
        assert!(result.collapses_performed >= 3);
    }

    #[test]
    fn output_normals_are_unit_or_zero() {
        let mesh = cube_mesh();
        let result = decimate(&mesh, &DecimateParams::with_target_ratio(0.0));
        let g = &result.mesh.geometry;
        for v in 0..g.vertex_count() as u32 {
            let len = g.normal(v).norm();
            assert!(len < 1e-5 || (len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn mode_aliases_run_collapse() {
        let mesh = cube_mesh();
        let collapse = decimate(&mesh, &DecimateParams::with_target_ratio(0.0));
        for mode in [DecimateMode::Planar, DecimateMode::Unsubdivide] {
            let aliased = decimate(
                &mesh,
                &DecimateParams::with_target_ratio(0.0).with_mode(mode),
            );
            assert_eq!(aliased.final_triangles, collapse.final_triangles);
        }
    }

    #[test]
    fn identity_is_preserved() {
        let mesh = cube_mesh();
        let result = decimate(&mesh, &DecimateParams::with_target_ratio(0.5));
        assert_eq!(result.mesh.id, "cube");
        assert_eq!(result.mesh.name, "Cube");
    }
}
