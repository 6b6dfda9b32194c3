//! Face-region extrusion.
//!
//! Extrusion clones the vertices of a selected set of faces, pushes the
//! clones out along a normal, remaps the selected faces onto the
//! clones, and stitches side quads along the boundary of the selection.
//!
//! # Example
//!
//! ```
//! use poly_types::{unit_cube, Mesh};
//! use poly_extrude::{extrude_faces, ExtrudeParams};
//!
//! let cube = Mesh::new("cube", "Cube", unit_cube());
//! // Extrude the two triangles of the top face.
//! let out = extrude_faces(&cube, &[2, 3], &ExtrudeParams::new(0.5));
//! assert!(out.geometry.triangle_count() > cube.geometry.triangle_count());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

mod extrude;
mod params;

pub use extrude::extrude_faces;
pub use params::ExtrudeParams;
