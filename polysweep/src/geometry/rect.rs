use std::fmt;

use super::{Area, Coord, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis aligned rectangle, always stored normalized (`left <= right`, `bottom <= top`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: Coord,
    pub bottom: Coord,
    pub right: Coord,
    pub top: Coord,
}

impl Rect {
    pub fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self {
            left: x1.min(x2),
            bottom: y1.min(y2),
            right: x1.max(x2),
            top: y1.max(y2),
        }
    }

    /// Bounding rectangle of a set of points, `None` if the set is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in iter {
            r.left = r.left.min(p.x);
            r.bottom = r.bottom.min(p.y);
            r.right = r.right.max(p.x);
            r.top = r.top.max(p.y);
        }
        Some(r)
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> Coord {
        self.top - self.bottom
    }

    #[inline]
    pub fn area(&self) -> Area {
        self.width() as Area * self.height() as Area
    }

    #[inline]
    pub fn lower_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    #[inline]
    pub fn upper_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    #[inline]
    pub fn touches(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.bottom <= other.top
            && self.top >= other.bottom
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{};{},{})",
            self.left, self.bottom, self.right, self.top
        )
    }
}
