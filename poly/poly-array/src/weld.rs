//! Close-vertex welding.

use hashbrown::HashMap;
use poly_types::Geometry;

/// Merge vertices whose positions agree after quantisation.
///
/// Positions are bucketed by rounding each coordinate to four decimal
/// digits; all vertices in a bucket collapse onto the first one seen.
/// Indices are remapped, unreferenced vertices are compacted away, and
/// triangles made degenerate by the merge are dropped by the rebuild.
/// The `threshold` widens the quantisation step when larger than the
/// default `1e-4` grid.
#[must_use]
pub fn weld_vertices(geometry: &Geometry, threshold: f32) -> Geometry {
    let step = threshold.max(1e-4);
    let inv_step = 1.0 / step;

    // First vertex per quantised position bucket.
    let mut buckets: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut remap: Vec<u32> = Vec::with_capacity(geometry.vertex_count());

    for v in 0..geometry.vertex_count() as u32 {
        let p = geometry.position(v);
        let key = (
            (f64::from(p.x) * f64::from(inv_step)).round() as i64,
            (f64::from(p.y) * f64::from(inv_step)).round() as i64,
            (f64::from(p.z) * f64::from(inv_step)).round() as i64,
        );
        let target = *buckets.entry(key).or_insert(v);
        remap.push(target);
    }

    // Compact the surviving vertices into fresh buffers.
    let mut compact: HashMap<u32, u32> = HashMap::new();
    let mut out = Geometry::with_capacity(geometry.vertex_count(), geometry.triangle_count());

    for v in 0..geometry.vertex_count() as u32 {
        let survivor = remap[v as usize];
        if survivor == v {
            let idx = out.push_vertex(geometry.position(v), geometry.normal(v), geometry.uv(v));
            compact.insert(v, idx);
        }
    }

    out.indices = geometry
        .indices
        .iter()
        .map(|&i| compact[&remap[i as usize]])
        .collect();

    out.rebuild();
    out
}
