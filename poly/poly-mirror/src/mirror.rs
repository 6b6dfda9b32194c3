//! Mirroring across an axis plane.

use poly_types::{Axis, Mesh};

use crate::params::MirrorParams;

/// Mirror a mesh across the chosen world-axis plane.
///
/// Every vertex is duplicated with its axis coordinate negated; with
/// `merge` enabled, vertices within `merge_threshold` of the plane map
/// to themselves. Mirrored triangles have their winding reversed so
/// they stay front-facing.
#[must_use]
pub fn mirror(mesh: &Mesh, params: &MirrorParams) -> Mesh {
    if mesh.geometry.is_empty() {
        return mesh.clone();
    }

    let mut geometry = mesh.geometry.clone();
    let axis = params.axis.index();
    let original_count = mesh.geometry.vertex_count() as u32;

    // Map each source vertex to its mirrored counterpart: itself when
    // on the plane and merging, a fresh negated clone otherwise.
    let mut mirrored: Vec<u32> = Vec::with_capacity(original_count as usize);
    for v in 0..original_count {
        let position = geometry.position(v);
        if params.merge && position[axis].abs() < params.merge_threshold {
            mirrored.push(v);
            continue;
        }

        let mut p = position;
        p[axis] = -p[axis];

        let mut n = geometry.normal(v);
        if params.flip_normals {
            n[axis] = -n[axis];
        }

        let mut uv = geometry.uv(v);
        if params.axis == Axis::X {
            uv.0 = 1.0 - uv.0;
        }

        mirrored.push(geometry.push_vertex(p, n, uv));
    }

    // Mirrored triangles with reversed winding.
    for tri in mesh.geometry.triangles() {
        geometry.indices.extend([
            mirrored[tri[0] as usize],
            mirrored[tri[2] as usize],
            mirrored[tri[1] as usize],
        ]);
    }

    geometry.rebuild();
    mesh.with_geometry(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use poly_types::Geometry;

    fn offset_triangle() -> Mesh {
        let mut g = Geometry::new();
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (0.25, 0.0));
        g.push_vertex(Point3::new(2.0, 0.0, 0.0), Vector3::z(), (0.75, 0.0));
        g.push_vertex(Point3::new(1.0, 1.0, 0.0), Vector3::z(), (0.25, 1.0));
        g.indices.extend([0, 1, 2]);
        g.rebuild();
        Mesh::new("tri", "Triangle", g)
    }

    #[test]
    fn mirror_without_merge_duplicates_everything() {
        let mesh = offset_triangle();
        let out = mirror(&mesh, &MirrorParams::new(Axis::X).with_merge(false));
        assert_eq!(out.geometry.vertex_count(), 6);
        assert_eq!(out.geometry.triangle_count(), 2);
        // Mirrored winding is reversed.
        assert_eq!(out.geometry.triangle(1), [3, 5, 4]);
        assert_relative_eq!(out.geometry.position(3).x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn double_mirror_restores_positions() {
        let mesh = offset_triangle();
        let params = MirrorParams::new(Axis::X).with_merge(false);
        let once = mirror(&mesh, &params);
        let twice = mirror(&once, &params);
        // The second mirror of the mirrored half lands back on the
        // original coordinates.
        for v in 0..3u32 {
            let original = mesh.geometry.position(v);
            let restored = twice.geometry.position(v + 9);
            assert_relative_eq!(original.x, restored.x, epsilon = 1e-6);
            assert_relative_eq!(original.y, restored.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn on_plane_vertices_merge() {
        let mut g = Geometry::new();
        g.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (1.0, 0.0));
        g.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z(), (0.0, 1.0));
        g.indices.extend([0, 1, 2]);
        g.rebuild();
        let mesh = Mesh::new("tri", "Triangle", g);

        let out = mirror(&mesh, &MirrorParams::new(Axis::X));
        // Vertices 0 and 2 sit on the plane: only vertex 1 duplicates.
        assert_eq!(out.geometry.vertex_count(), 4);
        assert_eq!(out.geometry.triangle(1), [0, 2, 3]);
    }

    #[test]
    fn x_mirror_flips_u() {
        let mesh = offset_triangle();
        let out = mirror(&mesh, &MirrorParams::new(Axis::X).with_merge(false));
        let (u, _) = out.geometry.uv(3);
        assert_relative_eq!(u, 0.75, epsilon = 1e-6);
    }

    #[test]
    fn y_mirror_keeps_u() {
        let mesh = offset_triangle();
        let out = mirror(&mesh, &MirrorParams::new(Axis::Y).with_merge(false));
        let (u, _) = out.geometry.uv(3);
        assert_relative_eq!(u, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn flip_normals_negates_component() {
        let mut mesh = offset_triangle();
        mesh.geometry.set_normal(0, Vector3::new(1.0, 0.0, 0.0));
        let out = mirror(&mesh, &MirrorParams::new(Axis::X).with_merge(false));
        assert_relative_eq!(out.geometry.normal(3).x, -1.0, epsilon = 1e-6);

        let kept = mirror(
            &mesh,
            &MirrorParams::new(Axis::X)
                .with_merge(false)
                .with_flip_normals(false),
        );
        assert_relative_eq!(kept.geometry.normal(3).x, 1.0, epsilon = 1e-6);
    }
}
