//! Brush types and settings.

use crate::falloff::FalloffType;

/// The per-vertex displacement rule of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushType {
    /// Drag vertices along the pointer delta.
    Grab,
    /// Relax vertices toward the mean of their one-ring neighbours.
    Smooth,
    /// Build up material along the vertex normal.
    Clay,
    /// Pull toward the hit point while pushing into the surface.
    Crease,
    /// Puff outward along the vertex normal.
    Inflate,
    /// Level vertices onto the average-normal plane through the hit.
    Flatten,
    /// Draw vertices toward the hit point.
    Pinch,
}

/// Active brush configuration.
#[derive(Debug, Clone)]
pub struct BrushSettings {
    /// Displacement rule.
    pub brush_type: BrushType,

    /// World-space brush radius.
    pub radius: f32,

    /// Displacement scale in `[0, 1]`.
    pub strength: f32,

    /// Distance falloff curve.
    pub falloff: FalloffType,

    /// Reverse the displacement direction.
    pub invert: bool,

    /// Strength of the smoothing pass run at stroke end; zero
    /// disables it.
    pub auto_smooth: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            brush_type: BrushType::Grab,
            radius: 0.5,
            strength: 0.5,
            falloff: FalloffType::Smooth,
            invert: false,
            auto_smooth: 0.0,
        }
    }
}

impl BrushSettings {
    /// Create settings for a brush type with defaults.
    #[must_use]
    pub fn new(brush_type: BrushType) -> Self {
        Self {
            brush_type,
            ..Default::default()
        }
    }

    /// Set the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the strength.
    #[must_use]
    pub const fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Set the falloff curve.
    #[must_use]
    pub const fn with_falloff(mut self, falloff: FalloffType) -> Self {
        self.falloff = falloff;
        self
    }

    /// Set direction inversion.
    #[must_use]
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the stroke-end smoothing strength.
    #[must_use]
    pub const fn with_auto_smooth(mut self, auto_smooth: f32) -> Self {
        self.auto_smooth = auto_smooth;
        self
    }
}
