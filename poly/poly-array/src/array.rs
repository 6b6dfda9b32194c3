//! Rigid-copy array.

use nalgebra::Vector3;
use poly_types::Mesh;

use crate::params::{ArrayMode, ArrayParams};
use crate::weld::weld_vertices;

/// Produce `count` offset copies of a mesh's geometry.
///
/// Copy `k` is translated by `k * step`, where the step follows the
/// offset mode. A count of one or zero returns the input unchanged.
#[must_use]
pub fn array(mesh: &Mesh, params: &ArrayParams) -> Mesh {
    if params.count <= 1 || mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let step = match params.mode {
        ArrayMode::Constant | ArrayMode::Object => params.offset,
        ArrayMode::Relative => {
            let size = mesh.geometry.bounds().size();
            Vector3::new(
                params.offset.x * size.x,
                params.offset.y * size.y,
                params.offset.z * size.z,
            )
        }
    };

    let source = &mesh.geometry;
    let mut geometry = source.clone();

    for k in 1..params.count {
        let translation = step * k as f32;
        let base = geometry.vertex_count() as u32;

        for v in 0..source.vertex_count() as u32 {
            geometry.push_vertex(
                source.position(v) + translation,
                source.normal(v),
                source.uv(v),
            );
        }
        geometry
            .indices
            .extend(source.indices.iter().map(|&i| i + base));
    }

    let mut geometry = if params.merge_vertices {
        weld_vertices(&geometry, 1e-4)
    } else {
        geometry
    };

    geometry.rebuild();
    mesh.with_geometry(geometry)
}
