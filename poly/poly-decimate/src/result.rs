//! Decimation result and statistics.

use std::fmt;

use poly_types::Mesh;

/// The decimated mesh together with collapse statistics.
#[derive(Debug, Clone)]
pub struct DecimationResult {
    /// The decimated mesh.
    pub mesh: Mesh,

    /// Triangle count before decimation.
    pub original_triangles: usize,

    /// Triangle count after decimation.
    pub final_triangles: usize,

    /// Edge collapses performed.
    pub collapses_performed: usize,

    /// Queue candidates discarded as stale (an endpoint had already
    /// been merged away).
    pub collapses_skipped: usize,
}

impl DecimationResult {
    /// Fraction of triangles removed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction(&self) -> f32 {
        if self.original_triangles == 0 {
            return 0.0;
        }
        1.0 - self.final_triangles as f32 / self.original_triangles as f32
    }
}

impl fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decimated {} -> {} triangles ({:.1}% reduction, {} collapses)",
            self.original_triangles,
            self.final_triangles,
            self.reduction() * 100.0,
            self.collapses_performed
        )
    }
}
