//! Parameters for extrusion.

/// Parameters for [`extrude_faces`](crate::extrude_faces).
#[derive(Debug, Clone)]
pub struct ExtrudeParams {
    /// Distance to push the cloned vertices.
    pub distance: f32,

    /// Displace each clone along its own vertex normal instead of the
    /// averaged selection normal. Default: false
    pub use_normals: bool,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            distance: 1.0,
            use_normals: false,
        }
    }
}

impl ExtrudeParams {
    /// Create params with the given distance and the averaged normal.
    #[must_use]
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    /// Set per-vertex normal displacement.
    #[must_use]
    pub const fn with_use_normals(mut self, use_normals: bool) -> Self {
        self.use_normals = use_normals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let params = ExtrudeParams::new(0.25).with_use_normals(true);
        assert!((params.distance - 0.25).abs() < f32::EPSILON);
        assert!(params.use_normals);
    }
}
