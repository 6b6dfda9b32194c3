//! Core data model for the polygonal modeling kernel.
//!
//! This crate provides the foundational types shared by every operator:
//!
//! - [`Geometry`] - Flat vertex/normal/UV/index buffers with derived
//!   [`Edge`] and [`Face`] lists
//! - [`Mesh`] - A geometry plus material, transform, and scene metadata
//! - [`Transform`] - Scale / Euler-XYZ rotation / translation
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layout
//!
//! Geometry buffers are packed `f32` arrays: positions and normals are
//! `3 * N` long, UVs `2 * N`, and indices come in CCW triples of `u32`.
//! The derived edge set stores each unordered pair once with `a < b`; the
//! derived face list carries one entry per triangle.
//!
//! Operators consume a mesh and return a new one; buffers are never shared
//! between input and output. The derived lists are rebuilt by
//! [`Geometry::rebuild`] at the end of every operation.
//!
//! # Example
//!
//! ```
//! use poly_types::Geometry;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut geometry = Geometry::new();
//! geometry.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
//! geometry.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), (1.0, 0.0));
//! geometry.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z(), (0.0, 1.0));
//! geometry.indices.extend([0, 1, 2]);
//! geometry.rebuild();
//!
//! assert_eq!(geometry.vertex_count(), 3);
//! assert_eq!(geometry.edges.len(), 3);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

mod bounds;
mod error;
mod geometry;
mod material;
mod mesh;
mod transform;
mod triangle;

pub use bounds::Aabb;
pub use error::GeometryError;
pub use geometry::{rebuild_edges_and_faces, Edge, Face, Geometry};
pub use material::{Color, Material};
pub use mesh::{unit_cube, Mesh};
pub use transform::{Axis, Transform};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
