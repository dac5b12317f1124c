use std::cmp::Ordering;

use crate::{
    evaluators::PropertyId,
    geometry::{Coord, Edge, Point},
};

/// Input edge as stored by the processor: the edge in its original direction and its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkEdge {
    pub edge: Edge,
    pub prop: PropertyId,
}

impl WorkEdge {
    #[inline]
    pub fn new(edge: Edge, prop: PropertyId) -> Self {
        Self { edge, prop }
    }

    /// Lower end point in scanline order.
    #[inline]
    pub fn lo(&self) -> Point {
        self.edge.lower()
    }

    /// Upper end point in scanline order.
    #[inline]
    pub fn hi(&self) -> Point {
        self.edge.upper()
    }

    /// True for edges pointing up, crossing them from the left enters the polygon.
    #[inline]
    pub fn enter(&self) -> bool {
        self.edge.p2 > self.edge.p1
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.edge.is_horizontal()
    }

    /// `(dx, dy)` from the lower to the upper point, `dy >= 0`.
    #[inline]
    pub fn span(&self) -> (i64, i64) {
        let (lo, hi) = (self.lo(), self.hi());
        (hi.x as i64 - lo.x as i64, hi.y as i64 - lo.y as i64)
    }

    /// `x` at scanline `y` as the fraction `(num, den)` with `den > 0`. Only valid for
    /// non-horizontal edges.
    #[inline]
    pub fn x_at(&self, y: Coord) -> (i128, i128) {
        let lo = self.lo();
        let (dx, dy) = self.span();
        if y == lo.y {
            return (lo.x as i128, 1);
        }
        if y == self.hi().y {
            return (self.hi().x as i128, 1);
        }
        (
            lo.x as i128 * dy as i128 + (y as i128 - lo.y as i128) * dx as i128,
            dy as i128,
        )
    }

    /// The edge between lower and upper point in upward direction.
    #[inline]
    pub fn upward(&self) -> Edge {
        Edge::new(self.lo(), self.hi())
    }
}

/// Compare two fractions with positive denominators.
#[inline]
pub fn cmp_frac(a: (i128, i128), b: (i128, i128)) -> Ordering {
    (a.0 * b.1).cmp(&(b.0 * a.1))
}

/// Compare the inverse slopes `dx / dy` of two non-horizontal edges.
#[inline]
pub fn cmp_slope(a: &WorkEdge, b: &WorkEdge) -> Ordering {
    let (adx, ady) = a.span();
    let (bdx, bdy) = b.span();
    (adx as i128 * bdy as i128).cmp(&(bdx as i128 * ady as i128))
}

/// Scanline order of non-horizontal edges: by lower point, then left to right above it.
pub fn cmp_sweep_order(a: &WorkEdge, b: &WorkEdge) -> Ordering {
    a.lo()
        .cmp(&b.lo())
        .then_with(|| cmp_slope(a, b))
        .then_with(|| a.hi().cmp(&b.hi()))
        .then_with(|| b.enter().cmp(&a.enter()))
        .then_with(|| a.prop.cmp(&b.prop))
}
