//! Array modifier.
//!
//! Produces `count` rigid copies of the input geometry, each offset by
//! a per-step vector, and optionally welds coincident vertices where
//! consecutive copies touch.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use poly_types::{unit_cube, Mesh};
//! use poly_array::{array, ArrayParams};
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//! let row = array(&cube, &ArrayParams::new(3, Vector3::new(2.0, 0.0, 0.0)));
//! assert_eq!(row.geometry.triangle_count(), 36);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

mod array;
mod params;
mod weld;

pub use array::array;
pub use params::{ArrayMode, ArrayParams};
pub use weld::weld_vertices;
