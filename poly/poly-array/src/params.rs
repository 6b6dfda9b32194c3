//! Parameters for the array modifier.

use nalgebra::Vector3;

/// How the per-step offset is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMode {
    /// The offset vector is applied literally per step.
    Constant,
    /// The offset is multiplied componentwise by the input's
    /// bounding-box size.
    Relative,
    /// Offset relative to an external object. Resolving the object
    /// transform is the host's job; the kernel treats this as
    /// [`ArrayMode::Constant`].
    Object,
}

/// Parameters for [`array`](crate::array).
#[derive(Debug, Clone)]
pub struct ArrayParams {
    /// Total number of copies, including the original. A count of one
    /// or zero is a no-op.
    pub count: u32,

    /// Per-step offset, interpreted by `mode`.
    pub offset: Vector3<f32>,

    /// Offset interpretation. Default: [`ArrayMode::Constant`]
    pub mode: ArrayMode,

    /// Weld coincident vertices of the concatenated result.
    /// Default: false
    pub merge_vertices: bool,
}

impl Default for ArrayParams {
    fn default() -> Self {
        Self {
            count: 2,
            offset: Vector3::new(1.0, 0.0, 0.0),
            mode: ArrayMode::Constant,
            merge_vertices: false,
        }
    }
}

impl ArrayParams {
    /// Create params with a constant per-step offset.
    #[must_use]
    pub fn new(count: u32, offset: Vector3<f32>) -> Self {
        Self {
            count,
            offset,
            ..Default::default()
        }
    }

    /// Set the offset mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ArrayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable vertex welding.
    #[must_use]
    pub const fn with_merge_vertices(mut self, merge: bool) -> Self {
        self.merge_vertices = merge;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let params = ArrayParams::new(4, Vector3::y())
            .with_mode(ArrayMode::Relative)
            .with_merge_vertices(true);
        assert_eq!(params.count, 4);
        assert_eq!(params.mode, ArrayMode::Relative);
        assert!(params.merge_vertices);
    }
}
