//! Mesh decimation with quadric error metrics.
//!
//! Reduces triangle count by iteratively collapsing the cheapest edge,
//! where cost is the quadric error of the edge midpoint against the
//! accumulated planes of both endpoints. The collapse target is
//! `floor(triangles * ratio)` with a floor of four triangles.
//!
//! # Algorithm
//!
//! 1. Accumulate a plane quadric per vertex from its incident faces
//! 2. Queue every edge with its midpoint error
//! 3. Pop the cheapest edge, merge its endpoints at the midpoint,
//!    combine their quadrics, and drop collapsed faces
//! 4. Requeue the merged vertex's edges and repeat until the target
//!    is reached or no candidates remain
//!
//! # Example
//!
//! ```
//! use poly_types::{unit_cube, Mesh};
//! use poly_decimate::{decimate, DecimateParams};
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//! let result = decimate(&cube, &DecimateParams::with_target_ratio(0.0));
//! assert_eq!(result.final_triangles, 4);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

mod decimate;
mod params;
mod quadric;
mod result;

pub use decimate::decimate;
pub use params::{DecimateMode, DecimateParams};
pub use result::DecimationResult;
