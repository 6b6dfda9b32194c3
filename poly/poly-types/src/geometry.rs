//! Flat-buffer triangle geometry and its derived topology.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// An unordered pair of vertex indices appearing as a triangle side.
///
/// Always stored canonically with `a < b`, so two edges over the same
/// vertex pair compare and hash equal regardless of construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Smaller vertex index.
    pub a: u32,
    /// Larger vertex index.
    pub b: u32,
}

impl Edge {
    /// Create a canonical edge from two vertex indices in either order.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }

    /// Whether this edge touches the given vertex.
    #[inline]
    #[must_use]
    pub const fn contains(self, v: u32) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint that is not `v`, or `None` if `v` is not an endpoint.
    #[inline]
    #[must_use]
    pub const fn other(self, v: u32) -> Option<u32> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}

/// One derived entry per triangle of the index buffer.
///
/// The normal is a display proxy taken from the first triangle vertex
/// during [`rebuild_edges_and_faces`]; operations that need an accurate
/// geometric normal recompute it from positions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// The triangle's vertex indices, CCW front-facing.
    pub vertex_indices: [u32; 3],
    /// Representative normal for display.
    pub normal: Vector3<f32>,
}

/// Indexed triangle geometry stored as packed flat buffers.
///
/// `vertices` and `normals` are `3 * N` floats, `uvs` is `2 * N`, and
/// `indices` holds CCW triangle triples. `edges` and `faces` are derived
/// from the index buffer and refreshed by [`Geometry::rebuild`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    /// Packed vertex positions `[x0, y0, z0, x1, ...]`.
    pub vertices: Vec<f32>,
    /// Packed per-vertex unit normals, same length as `vertices`.
    pub normals: Vec<f32>,
    /// Packed per-vertex texture coordinates `[u0, v0, u1, ...]`.
    pub uvs: Vec<f32>,
    /// Triangle index triples, CCW front-facing.
    pub indices: Vec<u32>,
    /// Derived deduplicated edge set.
    pub edges: Vec<Edge>,
    /// Derived per-triangle face list.
    pub faces: Vec<Face>,
}

impl Geometry {
    /// Create empty geometry.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create geometry with pre-allocated buffer capacity.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(triangle_count * 3),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Number of vertices, derived from the position buffer.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles in the index buffer.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the geometry has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`.
    #[inline]
    #[must_use]
    pub fn position(&self, i: u32) -> Point3<f32> {
        let o = i as usize * 3;
        Point3::new(self.vertices[o], self.vertices[o + 1], self.vertices[o + 2])
    }

    /// Overwrite the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: u32, p: Point3<f32>) {
        let o = i as usize * 3;
        self.vertices[o] = p.x;
        self.vertices[o + 1] = p.y;
        self.vertices[o + 2] = p.z;
    }

    /// Normal of vertex `i`.
    #[inline]
    #[must_use]
    pub fn normal(&self, i: u32) -> Vector3<f32> {
        let o = i as usize * 3;
        Vector3::new(self.normals[o], self.normals[o + 1], self.normals[o + 2])
    }

    /// Overwrite the normal of vertex `i`.
    #[inline]
    pub fn set_normal(&mut self, i: u32, n: Vector3<f32>) {
        let o = i as usize * 3;
        self.normals[o] = n.x;
        self.normals[o + 1] = n.y;
        self.normals[o + 2] = n.z;
    }

    /// Texture coordinates of vertex `i`.
    #[inline]
    #[must_use]
    pub fn uv(&self, i: u32) -> (f32, f32) {
        let o = i as usize * 2;
        (self.uvs[o], self.uvs[o + 1])
    }

    /// Overwrite the texture coordinates of vertex `i`.
    #[inline]
    pub fn set_uv(&mut self, i: u32, uv: (f32, f32)) {
        let o = i as usize * 2;
        self.uvs[o] = uv.0;
        self.uvs[o + 1] = uv.1;
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, p: Point3<f32>, n: Vector3<f32>, uv: (f32, f32)) -> u32 {
        let idx = self.vertex_count() as u32;
        self.vertices.extend([p.x, p.y, p.z]);
        self.normals.extend([n.x, n.y, n.z]);
        self.uvs.extend([uv.0, uv.1]);
        idx
    }

    /// The index triple of triangle `t`.
    #[inline]
    #[must_use]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        [
            self.indices[t * 3],
            self.indices[t * 3 + 1],
            self.indices[t * 3 + 2],
        ]
    }

    /// Iterate over triangle index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Geometric (position-derived) unit normal of triangle `t`, or zero
    /// for a degenerate triangle.
    #[must_use]
    pub fn triangle_normal(&self, t: usize) -> Vector3<f32> {
        let [i0, i1, i2] = self.triangle(t);
        let p0 = self.position(i0);
        let p1 = self.position(i1);
        let p2 = self.position(i2);
        let n = (p1 - p0).cross(&(p2 - p0));
        let len = n.norm();
        if len < 1e-12 { Vector3::zeros() } else { n / len }
    }

    /// Drop degenerate triangles and refresh the derived edge and face lists.
    ///
    /// A triangle is degenerate when it repeats a vertex index; such
    /// triangles are removed from the index buffer before the rebuild.
    pub fn rebuild(&mut self) {
        let mut kept = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                kept.extend_from_slice(tri);
            }
        }
        self.indices = kept;

        let (edges, faces) = rebuild_edges_and_faces(&self.indices, &self.normals);
        self.edges = edges;
        self.faces = faces;
    }

    /// Recompute per-vertex normals from positions.
    ///
    /// Accumulates the unnormalised cross product of each incident
    /// triangle (area weighting falls out of the magnitude) and
    /// renormalises. Isolated vertices get an explicit zero normal.
    pub fn recompute_vertex_normals(&mut self) {
        let n = self.vertex_count();
        let mut accum = vec![Vector3::zeros(); n];

        for tri in self.indices.chunks_exact(3) {
            let p0 = self.position(tri[0]);
            let p1 = self.position(tri[1]);
            let p2 = self.position(tri[2]);
            let cross = (p1 - p0).cross(&(p2 - p0));
            for &vi in tri {
                accum[vi as usize] += cross;
            }
        }

        for (i, sum) in accum.iter().enumerate() {
            let len = sum.norm();
            let normal = if len < 1e-12 {
                Vector3::zeros()
            } else {
                sum / len
            };
            self.set_normal(i as u32, normal);
        }
    }

    /// Check the structural invariants of the data model.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: misaligned buffers, a
    /// buffer-length mismatch, an index buffer whose length is not a
    /// multiple of three, or an out-of-range vertex index.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.len() % 3 != 0 {
            return Err(GeometryError::MisalignedPositions(self.vertices.len()));
        }
        if self.normals.len() != self.vertices.len() {
            return Err(GeometryError::NormalBufferMismatch {
                normals: self.normals.len(),
                vertices: self.vertices.len(),
            });
        }
        let n = self.vertex_count();
        if self.uvs.len() != n * 2 {
            return Err(GeometryError::UvBufferMismatch {
                uvs: self.uvs.len(),
                expected: n * 2,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::MisalignedIndices(self.indices.len()));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(GeometryError::IndexOutOfRange {
                index: bad,
                vertex_count: n,
            });
        }
        Ok(())
    }

    /// Axis-aligned bounds of the vertex positions.
    #[must_use]
    pub fn bounds(&self) -> crate::Aabb {
        let mut aabb = crate::Aabb::empty();
        for i in 0..self.vertex_count() {
            aabb.include(self.position(i as u32));
        }
        aabb
    }

    /// Append another geometry's buffers, offsetting its indices.
    pub fn merge(&mut self, other: &Self) {
        let offset = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }
}

/// Derive the canonical edge set and per-triangle face list of an index
/// buffer.
///
/// Edges are the unordered vertex pairs appearing as triangle sides,
/// each emitted once in first-seen order with `a < b`. Each face's
/// normal is taken from the per-vertex normal of its first vertex; this
/// is a cheap display proxy, not a geometric guarantee.
#[must_use]
pub fn rebuild_edges_and_faces(indices: &[u32], normals: &[f32]) -> (Vec<Edge>, Vec<Face>) {
    let mut seen: HashSet<Edge> = HashSet::with_capacity(indices.len());
    let mut edges = Vec::with_capacity(indices.len());
    let mut faces = Vec::with_capacity(indices.len() / 3);

    for tri in indices.chunks_exact(3) {
        for i in 0..3 {
            let edge = Edge::new(tri[i], tri[(i + 1) % 3]);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }

        let o = tri[0] as usize * 3;
        let normal = if o + 2 < normals.len() {
            Vector3::new(normals[o], normals[o + 1], normals[o + 2])
        } else {
            Vector3::zeros()
        };
        faces.push(Face {
            vertex_indices: [tri[0], tri[1], tri[2]],
            normal,
        });
    }

    (edges, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_triangle_quad() -> Geometry {
        let mut g = Geometry::new();
        g.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (1.0, 0.0));
        g.push_vertex(Point3::new(1.0, 1.0, 0.0), Vector3::z(), (1.0, 1.0));
        g.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z(), (0.0, 1.0));
        g.indices.extend([0, 1, 2, 0, 2, 3]);
        g.rebuild();
        g
    }

    #[test]
    fn edge_is_canonical() {
        assert_eq!(Edge::new(5, 3), Edge::new(3, 5));
        assert_eq!(Edge::new(3, 5).a, 3);
        assert_eq!(Edge::new(1, 1), Edge { a: 1, b: 1 });
    }

    #[test]
    fn edge_other_endpoint() {
        let e = Edge::new(2, 7);
        assert_eq!(e.other(2), Some(7));
        assert_eq!(e.other(7), Some(2));
        assert_eq!(e.other(4), None);
    }

    #[test]
    fn rebuild_dedups_shared_edges() {
        let g = two_triangle_quad();
        // 6 triangle sides, one shared diagonal: 5 unique edges
        assert_eq!(g.edges.len(), 5);
        assert_eq!(g.faces.len(), 2);
        assert!(g.edges.contains(&Edge::new(0, 2)));
    }

    #[test]
    fn rebuild_drops_degenerate_triangles() {
        let mut g = two_triangle_quad();
        g.indices.extend([1, 1, 3]);
        g.rebuild();
        assert_eq!(g.triangle_count(), 2);
    }

    #[test]
    fn recompute_normals_flat_quad() {
        let mut g = two_triangle_quad();
        // Scramble the stored normals, then recover them from positions.
        for i in 0..g.vertex_count() as u32 {
            g.set_normal(i, Vector3::x());
        }
        g.recompute_vertex_normals();
        for i in 0..g.vertex_count() as u32 {
            let n = g.normal(i);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn recompute_normals_isolated_vertex_is_zero() {
        let mut g = two_triangle_quad();
        g.push_vertex(Point3::new(5.0, 5.0, 5.0), Vector3::z(), (0.0, 0.0));
        g.recompute_vertex_normals();
        assert_eq!(g.normal(4), Vector3::zeros());
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(two_triangle_quad().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut g = two_triangle_quad();
        g.indices.extend([0, 1, 99]);
        assert!(matches!(
            g.validate(),
            Err(GeometryError::IndexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn validate_rejects_short_normal_buffer() {
        let mut g = two_triangle_quad();
        g.normals.pop();
        assert!(matches!(
            g.validate(),
            Err(GeometryError::NormalBufferMismatch { .. })
        ));
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = two_triangle_quad();
        let b = two_triangle_quad();
        a.merge(&b);
        a.rebuild();
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        assert_eq!(a.triangle(2), [4, 5, 6]);
    }

    #[test]
    fn triangle_normal_degenerate_is_zero() {
        let mut g = Geometry::new();
        g.push_vertex(Point3::origin(), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::origin(), Vector3::z(), (0.0, 0.0));
        g.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        g.indices.extend([0, 1, 2]);
        assert_eq!(g.triangle_normal(0), Vector3::zeros());
    }
}
