//! Quadric error metric.
//!
//! A quadric accumulates squared distances from a point to a set of
//! planes; summing the quadrics of two vertices prices their merge.

/// Symmetric 4x4 quadric matrix stored as its upper triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadric {
    // [a b c d]
    // [  e f g]
    // [    h i]
    // [      j]
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    g: f32,
    h: f32,
    i: f32,
    j: f32,
}

impl Quadric {
    /// Quadric of a single plane `ax + by + cz + d = 0` with a unit
    /// normal `(a, b, c)`.
    #[must_use]
    pub fn from_plane(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            a: a * a,
            b: a * b,
            c: a * c,
            d: a * d,
            e: b * b,
            f: b * c,
            g: b * d,
            h: c * c,
            i: c * d,
            j: d * d,
        }
    }

    /// Accumulate another quadric into this one.
    pub fn add(&mut self, other: &Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
        self.e += other.e;
        self.f += other.f;
        self.g += other.g;
        self.h += other.h;
        self.i += other.i;
        self.j += other.j;
    }

    /// Evaluate `v^T Q v` for `v = [x, y, z, 1]`: the summed squared
    /// distances from the point to every accumulated plane.
    #[must_use]
    pub fn evaluate(&self, x: f32, y: f32, z: f32) -> f32 {
        x * (self.a * x + 2.0 * (self.b * y + self.c * z + self.d))
            + y * (self.e * y + 2.0 * (self.f * z + self.g))
            + z * (self.h * z + 2.0 * self.i)
            + self.j
    }
}
