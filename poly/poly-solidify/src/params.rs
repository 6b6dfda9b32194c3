//! Parameters for solidify.

/// Parameters for [`solidify`](crate::solidify).
#[derive(Debug, Clone)]
pub struct SolidifyParams {
    /// Wall thickness between the two shells.
    pub thickness: f32,

    /// Shell placement in `[-1, 1]`: `0` centers the wall on the
    /// surface, `1` grows it entirely outward, `-1` inward.
    pub offset: f32,

    /// Recompute displacement directions from incident face normals
    /// instead of the stored vertex normals. Default: true
    pub even_thickness: bool,

    /// Close boundary edges with rim quads. Default: true
    pub fill_rim: bool,
}

impl Default for SolidifyParams {
    fn default() -> Self {
        Self {
            thickness: 0.1,
            offset: 0.0,
            even_thickness: true,
            fill_rim: true,
        }
    }
}

impl SolidifyParams {
    /// Create params with the given thickness.
    #[must_use]
    pub fn new(thickness: f32) -> Self {
        Self {
            thickness,
            ..Default::default()
        }
    }

    /// Set the shell placement offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Enable or disable even-thickness normals.
    #[must_use]
    pub const fn with_even_thickness(mut self, even: bool) -> Self {
        self.even_thickness = even;
        self
    }

    /// Enable or disable rim fill.
    #[must_use]
    pub const fn with_fill_rim(mut self, fill: bool) -> Self {
        self.fill_rim = fill;
        self
    }
}
