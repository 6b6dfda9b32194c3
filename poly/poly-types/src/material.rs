//! Material and color types, passed through operators unchanged.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color: 8-bit channels with a floating-point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Color {
    /// Create an opaque color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Opaque mid grey, the default surface color.
    pub const GREY: Self = Self::new(128, 128, 128);
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

/// Surface appearance. Opaque to the kernel: every operator copies the
/// input material onto its output untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Phong ambient coefficient.
    pub ambient: f32,
    /// Phong diffuse coefficient.
    pub diffuse: f32,
    /// Phong specular coefficient.
    pub specular: f32,
    /// Phong shininess exponent.
    pub shininess: f32,
    /// Overall opacity in `[0, 1]`.
    pub opacity: f32,
    /// Render as wireframe.
    pub wireframe: bool,
    /// Use flat (per-face) shading.
    pub flat_shading: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::default(),
            ambient: 0.1,
            diffuse: 0.8,
            specular: 0.5,
            shininess: 32.0,
            opacity: 1.0,
            wireframe: false,
            flat_shading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_opaque() {
        let c = Color::new(10, 20, 30);
        assert!((c.a - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn material_default_is_opaque() {
        let m = Material::default();
        assert!((m.opacity - 1.0).abs() < f32::EPSILON);
        assert!(!m.wireframe);
    }
}
