//! Parameters for decimation.

/// Decimation strategy.
///
/// `Planar` and `Unsubdivide` are accepted aliases that currently run
/// the edge-collapse path; they exist so hosts can store the mode a
/// user picked without the kernel erroring on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimateMode {
    /// Quadric edge collapse.
    #[default]
    Collapse,
    /// Planar simplification (alias of `Collapse`).
    Planar,
    /// Subdivision inverse (alias of `Collapse`).
    Unsubdivide,
}

/// Parameters for [`decimate`](crate::decimate).
#[derive(Debug, Clone)]
pub struct DecimateParams {
    /// Fraction of triangles to keep, in `[0, 1]`. Values at or above
    /// one are a no-op; the result never drops below four triangles.
    pub ratio: f32,

    /// Decimation strategy. Default: [`DecimateMode::Collapse`]
    pub mode: DecimateMode,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            mode: DecimateMode::Collapse,
        }
    }
}

impl DecimateParams {
    /// Create params keeping the given fraction of triangles.
    #[must_use]
    pub fn with_target_ratio(ratio: f32) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Set the decimation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: DecimateMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps() {
        assert!((DecimateParams::with_target_ratio(1.5).ratio - 1.0).abs() < f32::EPSILON);
        assert!(DecimateParams::with_target_ratio(-0.5).ratio.abs() < f32::EPSILON);
    }

    #[test]
    fn default_mode_is_collapse() {
        assert_eq!(DecimateParams::default().mode, DecimateMode::Collapse);
    }
}
