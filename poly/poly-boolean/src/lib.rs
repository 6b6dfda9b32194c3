//! Boolean CSG (union, difference, intersection) on triangle meshes.
//!
//! Each input mesh is baked into world-space polygons by applying its
//! full transform, then both polygon sets go through a BSP tree
//! pipeline in the classic clip/invert sequence for the requested
//! operation. The output polygon soup is fan-triangulated into fresh
//! geometry whose transform is the identity (positions are already in
//! world space).
//!
//! Texture coordinates do not survive the pipeline: every output
//! vertex gets `(0, 0)`. This is a documented limitation.
//!
//! The BSP tree lives in an arena (`Vec<Node>` with index children),
//! so inversion, clipping, and collection iterate flat storage instead
//! of recursing; tree depth never touches the native stack.
//!
//! # Example
//!
//! ```
//! use poly_types::{unit_cube, Mesh};
//! use poly_boolean::{boolean_mesh, BooleanOperation};
//!
//! let a = Mesh::new("a", "A", unit_cube());
//! let mut b = Mesh::new("b", "B", unit_cube());
//! b.transform.position.x = 0.5;
//!
//! let merged = boolean_mesh(&a, &b, BooleanOperation::Union);
//! assert!(!merged.geometry.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

mod bsp;
mod operation;
mod polygon;

pub use operation::{boolean_mesh, difference, intersection, union, BooleanOperation};
pub use polygon::{CsgVertex, Plane, Polygon};
