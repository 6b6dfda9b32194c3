//! Parameters for beveling.

/// Parameters for [`bevel_edges`](crate::bevel_edges).
#[derive(Debug, Clone)]
pub struct BevelParams {
    /// Chamfer offset distance.
    pub amount: f32,

    /// Requested ring count. Accepted for interface compatibility; the
    /// chamfer core always emits a single ring.
    pub segments: u32,
}

impl Default for BevelParams {
    fn default() -> Self {
        Self {
            amount: 0.1,
            segments: 1,
        }
    }
}

impl BevelParams {
    /// Create params with the given offset amount.
    #[must_use]
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    /// Set the requested segment count.
    #[must_use]
    pub const fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }
}
