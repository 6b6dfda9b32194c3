//! Polygonal modeling kernel.
//!
//! This umbrella crate re-exports every kernel crate under a short
//! module name, providing one dependency for hosts that want the whole
//! operator set.
//!
//! # Quick Start
//!
//! ```
//! use poly::prelude::*;
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//!
//! // Subdivide, then mirror across X.
//! let smooth = subdivide(&cube, &SubdivideParams::new(1));
//! let mirrored = mirror(&smooth, &MirrorParams::new(Axis::X));
//! assert!(mirrored.geometry.validate().is_ok());
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`types`] - `Geometry`, `Mesh`, `Transform`, `Material`, `Aabb`
//! - [`pick`] - Screen rays, raycasts, proximity queries
//!
//! ## Modifiers
//! - `extrude`, `subdivide`, `loopcut`, `bevel`, `mirror`, `array`,
//!   `solidify`, `knife`, `bridge`, `decimate` - one module per
//!   operation, each exposing a single operator function and a params
//!   struct
//!
//! ## Boolean CSG
//! - [`boolean`] - BSP-backed union / difference / intersection
//!
//! ## Sculpting
//! - [`sculpt`] - The stateful brush engine

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

/// Core data model.
pub use poly_types as types;

/// Picking and proximity queries.
pub use poly_pick as pick;

/// Face-region extrusion.
pub use poly_extrude as extrude;

/// 1-to-4 subdivision.
pub use poly_subdivide as subdivide;

/// Edge loop cuts.
pub use poly_loopcut as loopcut;

/// Edge chamfering.
pub use poly_bevel as bevel;

/// Axis-plane mirroring.
pub use poly_mirror as mirror;

/// Rigid-copy arrays and vertex welding.
pub use poly_array as array;

/// Two-shell solidify.
pub use poly_solidify as solidify;

/// Polyline knife cuts.
pub use poly_knife as knife;

/// Bridge edge loops.
pub use poly_bridge as bridge;

/// Quadric edge-collapse decimation.
pub use poly_decimate as decimate;

/// Boolean CSG.
pub use poly_boolean as boolean;

/// The sculpt engine.
pub use poly_sculpt as sculpt;

/// Common imports for kernel consumers.
///
/// # Usage
///
/// ```
/// use poly::prelude::*;
/// ```
pub mod prelude {
    pub use poly_array::{array, ArrayMode, ArrayParams};
    pub use poly_bevel::{bevel_edges, BevelParams};
    pub use poly_boolean::{boolean_mesh, BooleanOperation};
    pub use poly_bridge::{bridge_loops, detect_edge_loops, BlendMode, BridgeParams};
    pub use poly_decimate::{decimate, DecimateMode, DecimateParams};
    pub use poly_extrude::{extrude_faces, ExtrudeParams};
    pub use poly_knife::{knife, knife_project, KnifeParams};
    pub use poly_loopcut::{loop_cut, LoopCutParams};
    pub use poly_mirror::{mirror, MirrorParams};
    pub use poly_pick::{
        find_closest_vertex, is_point_near_edge, ray_from_screen, raycast_mesh, raycast_scene,
        Camera, Projection, Ray, RaycastHit,
    };
    pub use poly_sculpt::{BrushSettings, BrushType, FalloffType, SculptEngine};
    pub use poly_solidify::{solidify, SolidifyParams};
    pub use poly_subdivide::{subdivide, SubdivideParams};
    pub use poly_types::{
        rebuild_edges_and_faces, unit_cube, Aabb, Axis, Color, Edge, Face, Geometry, Material,
        Mesh, Transform, Triangle,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_smoke_test() {
        let mesh = Mesh::new("cube", "Cube", unit_cube());
        assert_eq!(mesh.geometry.triangle_count(), 12);
        let _ = SculptEngine::new();
        let _ = Camera::default();
    }

    #[test]
    fn operators_chain() {
        let cube = Mesh::new("cube", "Cube", unit_cube());
        let subdivided = subdivide(&cube, &SubdivideParams::new(1));
        let decimated = decimate(&subdivided, &DecimateParams::with_target_ratio(0.5));
        assert!(decimated.final_triangles < 48);
        assert!(decimated.mesh.geometry.validate().is_ok());
    }
}
