//! Brush-driven sculpting.
//!
//! The [`SculptEngine`] is the kernel's only stateful component: it
//! owns one bound mesh and mutates its vertex buffer in place across a
//! stroke of pointer events. A stroke runs `begin_stroke` (position
//! snapshot), any number of `update_stroke` steps (brush displacement
//! with optional symmetry replay), and `end_stroke` (auto-smooth and
//! normal recomputation). `undo_stroke` restores the snapshot.
//!
//! Seven brushes displace vertices inside the brush radius, weighted
//! by a falloff curve of the normalised distance from the hit point.
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use poly_types::{unit_cube, Mesh};
//! use poly_sculpt::SculptEngine;
//!
//! let mut engine = SculptEngine::new();
//! engine.set_mesh(Mesh::new("cube", "Cube", unit_cube()));
//! engine.begin_stroke(Point3::new(0.0, 0.0, 0.5));
//! engine.update_stroke(Point3::new(0.0, 0.0, 0.5), Vector3::new(0.0, 0.0, 0.1));
//! engine.end_stroke();
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

mod brush;
mod engine;
mod falloff;

pub use brush::{BrushSettings, BrushType};
pub use engine::SculptEngine;
pub use falloff::{falloff_weight, FalloffType};
