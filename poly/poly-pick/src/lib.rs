//! Picking: screen rays, ray/triangle intersection, and proximity
//! queries against transformed meshes.
//!
//! The entry points mirror how a viewport consumes the kernel:
//!
//! 1. [`ray_from_screen`] turns a mouse position and camera into a
//!    world-space [`Ray`].
//! 2. [`raycast_scene`] / [`raycast_mesh`] scan triangle buffers (after
//!    applying each mesh's transform) and return the nearest hit.
//! 3. [`find_closest_vertex`] and [`is_point_near_edge`] support vertex
//!    and edge selection.
//!
//! Intersection uses Möller–Trumbore with an epsilon of `1e-6`. No
//! query ever errors: a miss is `None` (or `false`).

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

mod camera;
mod intersect;
mod query;
mod ray;

pub use camera::{ray_from_screen, Camera, Projection};
pub use intersect::{ray_triangle, segment_triangle, TriangleHit, RAY_EPSILON};
pub use query::{find_closest_vertex, is_point_near_edge, raycast_mesh, raycast_scene, RaycastHit};
pub use ray::Ray;
