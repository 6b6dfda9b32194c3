//! Edge bevel (chamfer approximation).
//!
//! For every selected edge, each adjacent face contributes a
//! perpendicular direction (`edge x face normal`); the edge endpoints
//! are cloned per adjacent face, offset along that perpendicular, and
//! ribbon quads bridge the originals to the clones. Triangles that
//! referenced an endpoint are rerouted to its first clone.
//!
//! `segments` greater than one is accepted but still produces a single
//! ring; this is a documented simplification of the chamfer core.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

mod bevel;
mod params;

pub use bevel::bevel_edges;
pub use params::BevelParams;
