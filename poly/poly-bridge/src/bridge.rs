//! Bridge construction.

use std::f32::consts::PI;

use nalgebra::Vector3;
use poly_types::{Geometry, Mesh};

use crate::params::{BlendMode, BridgeParams};

/// Bridge two vertex loops with a tube of quads.
///
/// Either loop shorter than three vertices is a no-op. Rings are sized
/// to the first loop; indices into the second wrap modulo its length,
/// which clamps mismatched loop sizes rather than failing.
#[must_use]
pub fn bridge_loops(mesh: &Mesh, loop1: &[u32], loop2: &[u32], params: &BridgeParams) -> Mesh {
    if loop1.len() < 3 || loop2.len() < 3 || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();
    let n1 = loop1.len();
    let n2 = loop2.len();
    let segments = params.segments.max(1);

    let offset = if n1 == n2 && params.twist == 0 {
        best_alignment(&geometry, loop1, loop2)
    } else {
        params.twist
    };
    let partner =
        |i: usize| loop2[(i as i32 + offset).rem_euclid(n2 as i32) as usize];

    // Ring 0 is the first loop; ring `segments` is the aligned second
    // loop; intermediate rings get fresh blended vertices.
    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(segments as usize + 1);
    rings.push(loop1.to_vec());

    for s in 1..segments {
        let t = s as f32 / segments as f32;
        let shape = blend_curve(params.blend, t);
        let bulge_scale = (PI * t).sin() * params.smoothness * 0.25;

        let mut ring = Vec::with_capacity(n1);
        for i in 0..n1 {
            let a = loop1[i];
            let b = partner(i);

            let pa = geometry.position(a);
            let pb = geometry.position(b);
            let mut position = pa + (pb - pa) * shape;

            if params.smoothness > 0.0 {
                let along = geometry.normal(a) + geometry.normal(b);
                if along.norm() > 1e-12 {
                    position += along.normalize() * ((pb - pa).norm() * bulge_scale);
                }
            }

            let normal = {
                let n = geometry.normal(a) + (geometry.normal(b) - geometry.normal(a)) * shape;
                let len = n.norm();
                if len < 1e-12 { Vector3::zeros() } else { n / len }
            };

            let (ua, va) = geometry.uv(a);
            let (ub, vb) = geometry.uv(b);
            let uv = (ua + (ub - ua) * shape, va + (vb - va) * shape);

            ring.push(geometry.push_vertex(position, normal, uv));
        }
        rings.push(ring);
    }

    rings.push((0..n1).map(partner).collect());

    // A quad per index between every pair of consecutive rings.
    for pair in rings.windows(2) {
        let (near, far) = (&pair[0], &pair[1]);
        for i in 0..n1 {
            let j = (i + 1) % n1;
            geometry.indices.extend([near[i], near[j], far[j]]);
            geometry.indices.extend([near[i], far[j], far[i]]);
        }
    }

    geometry.rebuild();
    mesh.with_geometry(geometry)
}

/// Rotational offset of the second loop minimising the summed span
/// length between corresponding vertices.
fn best_alignment(geometry: &Geometry, loop1: &[u32], loop2: &[u32]) -> i32 {
    let n = loop1.len();
    let mut best = 0i32;
    let mut best_cost = f32::INFINITY;

    for offset in 0..n {
        let cost: f32 = (0..n)
            .map(|i| {
                let a = geometry.position(loop1[i]);
                let b = geometry.position(loop2[(i + offset) % n]);
                (a - b).norm()
            })
            .sum();
        if cost < best_cost {
            best_cost = cost;
            best = offset as i32;
        }
    }

    best
}

/// Reshape the ring parameter by the blend curve.
fn blend_curve(mode: BlendMode, t: f32) -> f32 {
    match mode {
        BlendMode::Linear => t,
        BlendMode::Smooth => t * t * (3.0 - 2.0 * t),
        BlendMode::Sphere => {
            let x = 2.0 * t - 1.0;
            0.5 * (1.0 - x * x).max(0.0).sqrt() + 0.5
        }
    }
}
