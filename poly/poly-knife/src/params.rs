//! Parameters for knife cuts.

/// Parameters for [`knife`](crate::knife).
#[derive(Debug, Clone, Default)]
pub struct KnifeParams {
    /// Extend each stroke segment far past its endpoints so the cut
    /// passes through the whole mesh. Default: false
    pub through_cut: bool,

    /// Stroke angle constraint in radians. Carried for hosts that snap
    /// strokes; the cut itself does not enforce it.
    pub angle_constraint: Option<f32>,
}

impl KnifeParams {
    /// Create params for a through cut.
    #[must_use]
    pub fn through() -> Self {
        Self {
            through_cut: true,
            angle_constraint: None,
        }
    }

    /// Set the stored angle constraint.
    #[must_use]
    pub const fn with_angle_constraint(mut self, radians: f32) -> Self {
        self.angle_constraint = Some(radians);
        self
    }
}
