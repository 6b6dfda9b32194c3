//! Brush falloff curves.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Shape of the brush weight over the normalised distance `t = d / r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalloffType {
    /// Smoothstep ease-out: `1 - (3t^2 - 2t^3)`.
    Smooth,
    /// Circular profile: `sqrt(1 - t^2)`.
    Sphere,
    /// Root profile: `1 - sqrt(t)`.
    Root,
    /// Parabolic profile: `1 - t^2`.
    InverseSquare,
    /// Cubic ease: `(1 - t)^3`.
    Sharp,
    /// Straight ramp: `1 - t`.
    Linear,
    /// Full weight over the whole radius.
    Constant,
    /// Linear ramp jittered per vertex, deterministic per seed.
    Random,
}

/// Evaluate a falloff curve.
///
/// `seed` individualises the [`FalloffType::Random`] curve per vertex;
/// the same seed always yields the same jitter, so strokes replay
/// identically. Distances at or beyond the radius weigh zero.
#[must_use]
pub fn falloff_weight(falloff: FalloffType, distance: f32, radius: f32, seed: u64) -> f32 {
    if radius <= 0.0 || distance < 0.0 {
        return 0.0;
    }
    if distance >= radius {
        return 0.0;
    }
    let t = distance / radius;

    match falloff {
        FalloffType::Smooth => 1.0 - t * t * (3.0 - 2.0 * t),
        FalloffType::Sphere => (1.0 - t * t).max(0.0).sqrt(),
        FalloffType::Root => 1.0 - t.sqrt(),
        FalloffType::InverseSquare => 1.0 - t * t,
        FalloffType::Sharp => {
            let s = 1.0 - t;
            s * s * s
        }
        FalloffType::Linear => 1.0 - t,
        FalloffType::Constant => 1.0,
        FalloffType::Random => {
            let mut rng = SmallRng::seed_from_u64(seed);
            (1.0 - t) * rng.gen::<f32>()
        }
    }
}
