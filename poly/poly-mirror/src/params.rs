//! Parameters for mirroring.

use poly_types::Axis;

/// Parameters for [`mirror`](crate::mirror).
#[derive(Debug, Clone)]
pub struct MirrorParams {
    /// Axis whose coordinate is negated.
    pub axis: Axis,

    /// Reuse vertices lying on the mirror plane instead of duplicating
    /// them. Default: true
    pub merge: bool,

    /// Distance from the plane below which a vertex counts as on it.
    /// Default: 1e-4
    pub merge_threshold: f32,

    /// Negate the mirrored normals' axis component. Default: true
    pub flip_normals: bool,
}

impl Default for MirrorParams {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            merge: true,
            merge_threshold: 1e-4,
            flip_normals: true,
        }
    }
}

impl MirrorParams {
    /// Create params for the given axis.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    /// Enable or disable on-plane vertex merging.
    #[must_use]
    pub const fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Set the merge distance threshold.
    #[must_use]
    pub const fn with_merge_threshold(mut self, threshold: f32) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Enable or disable normal flipping.
    #[must_use]
    pub const fn with_flip_normals(mut self, flip: bool) -> Self {
        self.flip_normals = flip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = MirrorParams::default();
        assert_eq!(params.axis, Axis::X);
        assert!(params.merge);
        assert!(params.flip_normals);
    }
}
