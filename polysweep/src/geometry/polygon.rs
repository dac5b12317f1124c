use std::fmt;

use super::{Area, Coord, Edge, Point, Rect};
use crate::core::math::{cross3, ring_area2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polygon with one hull and any number of holes.
///
/// The hull is stored clockwise and holes counter clockwise so the interior is always on the
/// right-hand side of every contour edge. Input contours are re-oriented on construction, their
/// points are otherwise kept as given.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Polygon {
    hull: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

/// Polygon without holes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SimplePolygon {
    hull: Vec<Point>,
}

fn strip_closing_point(mut points: Vec<Point>) -> Vec<Point> {
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Orient a contour clockwise. Contours with zero area are reversed as well, so a
/// self-overlapping contour with balanced lobes is always taken in its reversed direction.
fn make_clockwise(mut points: Vec<Point>) -> Vec<Point> {
    if ring_area2(&points) >= 0 {
        points.reverse();
    }
    points
}

fn make_counter_clockwise(mut points: Vec<Point>) -> Vec<Point> {
    if ring_area2(&points) < 0 {
        points.reverse();
    }
    points
}

/// Remove repeated and collinear points from a closed contour and rotate it so it starts at its
/// smallest point in scanline order.
pub(crate) fn normalize_contour(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }

    // drop collinear points until stable, spikes included
    let mut changed = true;
    while changed && pts.len() >= 3 {
        changed = false;
        let n = pts.len();
        let mut keep = Vec::with_capacity(n);
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            if cross3(prev, pts[i], next) == 0 {
                changed = true;
            } else {
                keep.push(pts[i]);
            }
        }
        if changed {
            // removing all points of one collinear run at once is fine, the run's end points
            // always survive because their neighbours are off the line
            pts = keep;
            pts.dedup();
        }
    }
    if pts.len() < 3 {
        return Vec::new();
    }

    let start = pts
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| **p)
        .map(|(i, _)| i)
        .unwrap_or(0);
    pts.rotate_left(start);
    pts
}

fn contour_edges(points: &[Point]) -> impl Iterator<Item = Edge> + '_ {
    let n = points.len();
    (0..n).map(move |i| Edge::new(points[i], points[(i + 1) % n]))
}

fn write_contour(f: &mut fmt::Formatter<'_>, points: &[Point]) -> fmt::Result {
    write!(f, "(")?;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            write!(f, ";")?;
        }
        write!(f, "{}", p)?;
    }
    write!(f, ")")
}

impl Polygon {
    /// Create a polygon from its hull points. A repeated closing point is dropped and the hull
    /// is oriented clockwise.
    pub fn new(hull: Vec<Point>) -> Self {
        Self {
            hull: make_clockwise(strip_closing_point(hull)),
            holes: Vec::new(),
        }
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            hull: vec![
                Point::new(rect.left, rect.bottom),
                Point::new(rect.left, rect.top),
                Point::new(rect.right, rect.top),
                Point::new(rect.right, rect.bottom),
            ],
            holes: Vec::new(),
        }
    }

    /// Create a polygon from contours that already carry the output orientation.
    pub(crate) fn from_oriented(hull: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { hull, holes }
    }

    /// Add a hole, oriented counter clockwise.
    pub fn insert_hole(&mut self, hole: Vec<Point>) {
        self.holes
            .push(make_counter_clockwise(strip_closing_point(hole)));
    }

    pub fn with_hole(mut self, hole: Vec<Point>) -> Self {
        self.insert_hole(hole);
        self
    }

    #[inline]
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    #[inline]
    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    #[inline]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.hull.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hull.is_empty()
    }

    /// All contour edges, hull first, in contour direction.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        contour_edges(&self.hull).chain(self.holes.iter().flat_map(|h| contour_edges(h)))
    }

    /// Twice the enclosed area. Exact for any integer polygon.
    pub fn area2(&self) -> i128 {
        -ring_area2(&self.hull) - self.holes.iter().map(|h| ring_area2(h)).sum::<i128>()
    }

    /// Enclosed area, holes subtracted.
    pub fn area(&self) -> f64 {
        self.area2() as f64 * 0.5
    }

    pub fn bbox(&self) -> Option<Rect> {
        Rect::from_points(self.hull.iter().copied())
    }

    pub fn translate(&self, dx: Coord, dy: Coord) -> Polygon {
        let mv = |c: &Vec<Point>| c.iter().map(|p| p.translate(dx, dy)).collect::<Vec<_>>();
        Polygon {
            hull: mv(&self.hull),
            holes: self.holes.iter().map(mv).collect(),
        }
    }

    /// Total perimeter length of all contours.
    pub fn perimeter(&self) -> f64 {
        self.edges()
            .map(|e| (e.p1.sq_distance(e.p2) as f64).sqrt())
            .sum()
    }

    /// Area as an integer if it is integral (always the case for rectilinear polygons) and fits
    /// into [Area].
    pub fn integer_area(&self) -> Option<Area> {
        let a2 = self.area2();
        if a2 % 2 != 0 {
            return None;
        }
        Area::try_from(a2 / 2).ok()
    }
}

impl SimplePolygon {
    pub fn new(hull: Vec<Point>) -> Self {
        Self {
            hull: make_clockwise(strip_closing_point(hull)),
        }
    }

    #[inline]
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        contour_edges(&self.hull)
    }

    pub fn area2(&self) -> i128 {
        -ring_area2(&self.hull)
    }

    pub fn area(&self) -> f64 {
        self.area2() as f64 * 0.5
    }
}

impl From<SimplePolygon> for Polygon {
    fn from(value: SimplePolygon) -> Self {
        Polygon {
            hull: value.hull,
            holes: Vec::new(),
        }
    }
}

impl From<Rect> for Polygon {
    fn from(value: Rect) -> Self {
        Polygon::from_rect(&value)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_contour(f, &self.hull)?;
        for hole in self.holes.iter() {
            write!(f, "/")?;
            write_contour(f, hole)?;
        }
        Ok(())
    }
}

impl fmt::Display for SimplePolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_contour(f, &self.hull)
    }
}
