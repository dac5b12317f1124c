//! Offsetting of polygon contours for sizing (growing or shrinking) polygons.
//!
//! Each contour edge is moved outwards by the sizing distance. Where the moved edges of a corner
//! separate, the gap is closed with a full miter, so acute corners keep their tip and shrinking
//! by the same distance restores them. Where they overlap, they are connected through the
//! original vertex. The resulting self-overlapping contours are cleaned up by merging with a
//! positive wrap count.
use crate::{
    error::{Error, Result},
    geometry::{Coord, Edge, Point, Polygon},
};

/// Check that `dx` and `dy` do not have opposite signs.
pub fn check_sizing(dx: Coord, dy: Coord) -> Result<()> {
    if (dx > 0 && dy < 0) || (dx < 0 && dy > 0) {
        return Err(Error::InconsistentSizing { dx, dy });
    }
    Ok(())
}

/// Offset edges of all contours of `polygon` by `dx` horizontally and `dy` vertically.
pub fn sized_contour_edges(polygon: &Polygon, dx: Coord, dy: Coord) -> Result<Vec<Edge>> {
    check_sizing(dx, dy)?;
    let mut out = Vec::with_capacity(polygon.vertex_count() * 2);
    size_contour(polygon.hull(), dx, dy, &mut out);
    for hole in polygon.holes() {
        size_contour(hole, dx, dy, &mut out);
    }
    Ok(out)
}

#[inline]
fn round_point(x: f64, y: f64) -> Point {
    Point::new(x.round() as Coord, y.round() as Coord)
}

/// Offset of an edge direction towards its left side, which is outside for contours with the
/// interior on the right.
fn offset_vector(d: (f64, f64), dx: f64, dy: f64) -> (f64, f64) {
    let len = (d.0 * d.0 + d.1 * d.1).sqrt();
    (-d.1 * dx / len, d.0 * dy / len)
}

fn size_contour(points: &[Point], dx: Coord, dy: Coord, out: &mut Vec<Edge>) {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let n = pts.len();
    if n < 2 {
        return;
    }

    let (fdx, fdy) = (dx as f64, dy as f64);
    let sign = if dx != 0 { dx.signum() } else { dy.signum() };

    let dir = |i: usize| {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        (b.x as f64 - a.x as f64, b.y as f64 - a.y as f64)
    };

    let mut contour: Vec<Point> = Vec::with_capacity(n * 3);
    for i in 0..n {
        // corner at pts[i + 1] between edge i and edge i + 1
        let v = pts[(i + 1) % n];
        let da = dir(i);
        let db = dir((i + 1) % n);
        let na = offset_vector(da, fdx, fdy);
        let nb = offset_vector(db, fdx, fdy);
        let (vx, vy) = (v.x as f64, v.y as f64);

        let a_end = (vx + na.0, vy + na.1);
        let b_start = (vx + nb.0, vy + nb.1);

        let turn = da.0 * db.1 - da.1 * db.0;
        let separating = (turn < 0.0 && sign > 0) || (turn > 0.0 && sign < 0);

        contour.push(round_point(a_end.0, a_end.1));
        if separating {
            // offset lines a_end + s * da and b_start + t * db
            let den = da.0 * db.1 - da.1 * db.0;
            let s = ((b_start.0 - a_end.0) * db.1 - (b_start.1 - a_end.1) * db.0) / den;
            contour.push(round_point(a_end.0 + s * da.0, a_end.1 + s * da.1));
        } else if turn != 0.0 {
            contour.push(v);
        }
        contour.push(round_point(b_start.0, b_start.1));
    }

    let m = contour.len();
    for i in 0..m {
        let e = Edge::new(contour[i], contour[(i + 1) % m]);
        if !e.is_degenerate() {
            out.push(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_signs_rejected() {
        assert_eq!(
            check_sizing(5, -1),
            Err(Error::InconsistentSizing { dx: 5, dy: -1 })
        );
        assert!(check_sizing(0, -1).is_ok());
        assert!(check_sizing(3, 3).is_ok());
    }

    #[test]
    fn square_grows_with_miter_corners() {
        let p = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        let edges = sized_contour_edges(&p, 2, 2).unwrap();
        let pts: Vec<Point> = edges.iter().map(|e| e.p1).collect();
        assert!(pts.contains(&Point::new(-2, 12)));
        assert!(pts.contains(&Point::new(12, -2)));
        assert!(pts.iter().all(|p| p.x >= -2 && p.x <= 12 && p.y >= -2 && p.y <= 12));
    }

    #[test]
    fn acute_corner_keeps_tip() {
        // 36.87 degree corner at the origin, offsets along the sloped edge stay integral
        let p = Polygon::new(vec![Point::new(0, 0), Point::new(40, 30), Point::new(40, 0)]);
        let edges = sized_contour_edges(&p, 10, 10).unwrap();
        let pts: Vec<Point> = edges.iter().map(|e| e.p1).collect();
        assert!(pts.contains(&Point::new(-30, -10)));
        assert!(pts.contains(&Point::new(50, 50)));
        assert!(pts.contains(&Point::new(50, -10)));
    }
}
