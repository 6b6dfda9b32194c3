//! Bridge edge loops.
//!
//! Connects two vertex loops with a tube of quads, optionally through
//! intermediate rings shaped by a blend curve and bulged along the
//! loop normals. When the loops have equal length and no explicit
//! twist, the rotational alignment minimising total span length is
//! chosen automatically.
//!
//! [`detect_edge_loops`] recovers closed loops from an edge selection
//! by walking its adjacency map.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

mod bridge;
mod loops;
mod params;

pub use bridge::bridge_loops;
pub use loops::detect_edge_loops;
pub use params::{BlendMode, BridgeParams};
