//! Scanline edge processing for polygons on an integer grid.
//!
//! Edges tagged with a property id are inserted into an
//! [EdgeProcessor](edge_processor::EdgeProcessor), split at all mutual intersections and swept
//! bottom to top through one or more [operators](evaluators) which decide edge by edge what
//! belongs to the output. The output goes to [sinks], for instance to collect edges or to
//! assemble polygons.
//!
//! Supported operations include merging, boolean operations, sizing, interaction and
//! containment queries, edge versus polygon classification and area accounting per
//! combination of overlapping inputs.
#[macro_use]
mod macros;
mod error;

pub mod bit_set;
pub mod core;
pub mod edge_processor;
pub mod evaluators;
pub mod geometry;
pub mod polygon_tools;
pub mod sinks;
pub mod sizing;

pub use crate::error::{Error, Result};
