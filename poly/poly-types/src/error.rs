//! Error types for the mesh data model.

use thiserror::Error;

/// Structural violations of the geometry data model.
///
/// These indicate programming errors in the host, not recoverable
/// conditions: operators assume validated input and are free to panic on
/// malformed buffers.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Position buffer length is not a multiple of 3.
    #[error("position buffer length {0} is not a multiple of 3")]
    MisalignedPositions(usize),

    /// Normal buffer length disagrees with the position buffer.
    #[error("normal buffer length {normals} does not match position buffer length {vertices}")]
    NormalBufferMismatch {
        /// Actual normal buffer length.
        normals: usize,
        /// Position buffer length it must match.
        vertices: usize,
    },

    /// UV buffer length is not `2 * vertex_count`.
    #[error("uv buffer length {uvs} does not match expected {expected}")]
    UvBufferMismatch {
        /// Actual UV buffer length.
        uvs: usize,
        /// Expected length.
        expected: usize,
    },

    /// Index buffer length is not a multiple of 3.
    #[error("index buffer length {0} is not a multiple of 3")]
    MisalignedIndices(usize),

    /// A triangle references a vertex past the end of the buffers.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices in the geometry.
        vertex_count: usize,
    },
}
