//! Parameters for subdivision.

/// Parameters for [`subdivide`](crate::subdivide).
#[derive(Debug, Clone)]
pub struct SubdivideParams {
    /// Number of full subdivision passes. Zero is a no-op.
    pub iterations: u32,

    /// Relax original vertices toward their neighbourhood centroid
    /// after each split. Default: false
    pub smooth: bool,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            smooth: false,
        }
    }
}

impl SubdivideParams {
    /// Create params with the given iteration count.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Enable or disable smoothing.
    #[must_use]
    pub const fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }
}
