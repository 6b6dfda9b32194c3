//! Triangle subdivision.
//!
//! Each pass splits every triangle into four by inserting edge
//! midpoints, memoised per edge so triangles sharing an edge share the
//! midpoint vertex. Midpoint attributes are linear interpolations at
//! `t = 0.5` with normals renormalised.
//!
//! With smoothing enabled, each pass additionally relaxes the original
//! vertices toward the centroid of their post-split neighbourhood,
//! giving a Catmull-Clark-flavoured rounding; midpoint vertices stay
//! put.
//!
//! # Example
//!
//! ```
//! use poly_types::{unit_cube, Mesh};
//! use poly_subdivide::{subdivide, SubdivideParams};
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//! let out = subdivide(&cube, &SubdivideParams::new(1));
//! assert_eq!(out.geometry.triangle_count(), 48);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

mod params;
mod subdivide;

pub use params::SubdivideParams;
pub use subdivide::subdivide;
