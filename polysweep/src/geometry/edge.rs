use std::fmt;

use super::{Coord, Point, Rect};
use crate::core::math::{cross3, dot3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directed edge from `p1` to `p2`.
///
/// Direction matters: with the interior of a region kept on the right-hand side, an edge
/// pointing up (north) is crossed when entering the region from the left and an edge pointing
/// down is crossed when leaving it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub p1: Point,
    pub p2: Point,
}

impl Edge {
    #[inline]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub const fn from_coords(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn dx(&self) -> i64 {
        self.p2.x as i64 - self.p1.x as i64
    }

    #[inline]
    pub fn dy(&self) -> i64 {
        self.p2.y as i64 - self.p1.y as i64
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    /// True if the edge points north. Crossing such an edge left to right enters a region.
    #[inline]
    pub fn is_upward(&self) -> bool {
        self.p2.y > self.p1.y
    }

    #[inline]
    pub fn reversed(&self) -> Edge {
        Edge::new(self.p2, self.p1)
    }

    /// Endpoint with the smaller scanline order (lower `y`, then lower `x`).
    #[inline]
    pub fn lower(&self) -> Point {
        self.p1.min(self.p2)
    }

    /// Endpoint with the larger scanline order.
    #[inline]
    pub fn upper(&self) -> Point {
        self.p1.max(self.p2)
    }

    #[inline]
    pub fn bbox(&self) -> Rect {
        Rect::new(self.p1.x, self.p1.y, self.p2.x, self.p2.y)
    }

    /// Which side of the infinite line through the edge `p` is on: positive for left,
    /// negative for right, zero if on the line.
    #[inline]
    pub fn side_of(&self, p: Point) -> i128 {
        cross3(self.p1, self.p2, p)
    }

    /// True if `p` lies on the edge but is not one of its endpoints.
    pub fn contains_interior(&self, p: Point) -> bool {
        if p == self.p1 || p == self.p2 || self.is_degenerate() {
            return false;
        }
        if self.side_of(p) != 0 {
            return false;
        }
        let d = dot3(self.p1, self.p2, p);
        d > 0 && d < self.p1.sq_distance(self.p2)
    }

    /// True if `p` lies on the edge, endpoints included.
    pub fn contains(&self, p: Point) -> bool {
        p == self.p1 || p == self.p2 || self.contains_interior(p)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{})", self.p1, self.p2)
    }
}
