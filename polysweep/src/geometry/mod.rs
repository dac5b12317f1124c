//! Immutable geometric value types: points, edges, rectangles and polygons on the integer grid.
mod edge;
mod point;
mod polygon;
mod rect;

pub use edge::*;
pub use point::*;
pub use polygon::*;
pub use rect::*;
