//! Edge loop cuts.
//!
//! Every selected edge receives `cuts` evenly spaced cut vertices,
//! memoised per canonical edge so both triangles flanking an edge see
//! the same vertices. Triangles are then retriangulated according to
//! how many of their edges were cut:
//!
//! - no cut edges: kept as-is
//! - one cut edge: a fan from the opposite vertex
//! - two cut edges (sharing a vertex): a tip triangle, a strip of
//!   quads, and a base band
//! - three cut edges: kept as-is (known limitation)
//!
//! # Example
//!
//! ```
//! use poly_types::{unit_cube, Mesh};
//! use poly_loopcut::{loop_cut, LoopCutParams};
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//! let edges = vec![cube.geometry.edges[0]];
//! let out = loop_cut(&cube, &edges, &LoopCutParams::new(1));
//! assert!(out.geometry.triangle_count() > cube.geometry.triangle_count());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

mod loopcut;
mod params;

pub use loopcut::loop_cut;
pub use params::LoopCutParams;
