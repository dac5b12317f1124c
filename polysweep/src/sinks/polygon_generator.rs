use std::cmp::Ordering;

use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

use super::{EdgeSink, PolygonSink};
use crate::{
    core::math::{cmp_ccw_angle, cross3, ring_area2, winding_number2},
    geometry::{normalize_contour, Edge, Point, Polygon, Rect},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how output edges are assembled into polygons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolygonOptions {
    /// Connect every hole to its hull so the output polygons have no holes.
    pub resolve_holes: bool,
    /// Minimum coherence: contours touching themselves or others at a vertex are split there,
    /// giving the least connected result. If false, touching contours are joined into one
    /// maximally connected contour. The name follows the usual meaning of this option in layout
    /// tools, where `true` is the splitting variant.
    pub min_coherence: bool,
}

impl PolygonOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_resolve_holes(mut self, resolve_holes: bool) -> Self {
        self.resolve_holes = resolve_holes;
        self
    }

    pub fn with_min_coherence(mut self, min_coherence: bool) -> Self {
        self.min_coherence = min_coherence;
        self
    }
}

/// Edge sink assembling the output edges of a sweep into polygons.
///
/// The edges must form closed contours with the interior on the right, which is what every
/// boundary producing operator delivers. Polygons are handed to the polygon sink on flush.
pub struct PolygonGenerator<S> {
    sink: S,
    options: PolygonOptions,
    edges: Vec<Edge>,
}

impl<S> PolygonGenerator<S>
where
    S: PolygonSink,
{
    pub fn new(sink: S, options: PolygonOptions) -> Self {
        Self {
            sink,
            options,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> PolygonOptions {
        self.options
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S> EdgeSink for PolygonGenerator<S>
where
    S: PolygonSink,
{
    fn start(&mut self) {
        self.edges.clear();
        self.sink.start();
    }

    fn flush(&mut self) {
        for p in assemble_polygons(&self.edges, self.options) {
            self.sink.put_polygon(p);
        }
        self.edges.clear();
        self.sink.flush();
    }

    fn put(&mut self, edge: &Edge) {
        if !edge.is_degenerate() {
            self.edges.push(*edge);
        }
    }
}

/// Assemble closed, intersection-free contours given as edges into polygons.
pub fn assemble_polygons(edges: &[Edge], options: PolygonOptions) -> Vec<Polygon> {
    let mut hulls = Vec::new();
    let mut holes = Vec::new();
    for contour in trace_contours(edges, options.min_coherence) {
        let contour = normalize_contour(&contour);
        match ring_area2(&contour).cmp(&0) {
            Ordering::Less => hulls.push(contour),
            Ordering::Greater => holes.push(contour),
            Ordering::Equal => {}
        }
    }

    let mut hull_holes: Vec<Vec<Vec<Point>>> = vec![Vec::new(); hulls.len()];
    if !holes.is_empty() {
        let assignment = assign_holes(&hulls, &holes);
        for (hole, owner) in holes.into_iter().zip(assignment) {
            match owner {
                Some(i) => hull_holes[i].push(hole),
                None => log::warn!("dropping hole contour without enclosing hull"),
            }
        }
    }

    hulls
        .into_iter()
        .zip(hull_holes)
        .map(|(hull, mut holes)| {
            if options.resolve_holes && !holes.is_empty() {
                Polygon::from_oriented(bridge_holes(hull, holes), Vec::new())
            } else {
                holes.sort();
                Polygon::from_oriented(hull, holes)
            }
        })
        .collect()
}

#[inline]
fn direction(from: Point, to: Point) -> (i64, i64) {
    (to.x as i64 - from.x as i64, to.y as i64 - from.y as i64)
}

/// Follow the edges into closed point rings. At vertices with several unused outgoing edges the
/// sharpest right turn is taken for `min_coherence` and the sharpest left turn otherwise.
fn trace_contours(edges: &[Edge], min_coherence: bool) -> Vec<Vec<Point>> {
    let mut edges = edges.to_vec();
    edges.sort_unstable();
    let n = edges.len();
    let mut used = vec![false; n];
    let mut contours = Vec::new();

    for start in 0..n {
        if used[start] {
            continue;
        }
        let mut contour = Vec::new();
        let mut current = start;
        loop {
            used[current] = true;
            let e = edges[current];
            contour.push(e.p1);

            let from = edges.partition_point(|c| c.p1 < e.p2);
            let to = edges.partition_point(|c| c.p1 <= e.p2);
            let back = direction(e.p2, e.p1);
            let next = (from..to)
                .filter(|&i| !used[i] || i == start)
                .reduce(|best, i| {
                    let ord = cmp_ccw_angle(
                        back,
                        direction(e.p2, edges[i].p2),
                        direction(e.p2, edges[best].p2),
                    );
                    let better = if min_coherence {
                        ord == Ordering::Less
                    } else {
                        ord == Ordering::Greater
                    };
                    if better {
                        i
                    } else {
                        best
                    }
                });

            match next {
                Some(i) if i == start => break,
                Some(i) => current = i,
                None => {
                    log::warn!("open contour ending at {}", e.p2);
                    break;
                }
            }
        }
        contours.push(contour);
    }

    contours
}

fn ring_bbox(points: &[Point]) -> Rect {
    Rect::from_points(points.iter().copied()).unwrap_or_else(|| Rect::new(0, 0, 0, 0))
}

fn build_index(boxes: &[Rect]) -> StaticAABB2DIndex<i32> {
    let mut builder = StaticAABB2DIndexBuilder::new(boxes.len());
    for b in boxes {
        builder.add(b.left, b.bottom, b.right, b.top);
    }
    match builder.build() {
        Ok(index) => index,
        Err(e) => unreachable!("index built with matching item count: {:?}", e),
    }
}

/// True if the doubled point lies on the boundary of the ring.
fn on_ring2(points: &[Point], px2: i64, py2: i64) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ax, ay) = (2 * a.x as i64, 2 * a.y as i64);
        let (bx, by) = (2 * b.x as i64, 2 * b.y as i64);
        let side = (bx - ax) as i128 * (py2 - ay) as i128 - (by - ay) as i128 * (px2 - ax) as i128;
        side == 0
            && px2 >= ax.min(bx)
            && px2 <= ax.max(bx)
            && py2 >= ay.min(by)
            && py2 <= ay.max(by)
    })
}

/// Find the smallest hull enclosing each hole.
fn assign_holes(hulls: &[Vec<Point>], holes: &[Vec<Point>]) -> Vec<Option<usize>> {
    let boxes: Vec<Rect> = hulls.iter().map(|h| ring_bbox(h)).collect();
    let index = build_index(&boxes);
    let areas: Vec<i128> = hulls.iter().map(|h| -ring_area2(h)).collect();
    let mut query_stack = Vec::new();
    let mut candidates = Vec::new();

    holes
        .iter()
        .map(|hole| {
            let hb = ring_bbox(hole);
            candidates.clear();
            let mut visitor = |i: usize| {
                let b = &boxes[i];
                if b.left <= hb.left && b.bottom <= hb.bottom && b.right >= hb.right && b.top >= hb.top
                {
                    candidates.push(i);
                }
            };
            index.visit_query_with_stack(
                hb.left,
                hb.bottom,
                hb.right,
                hb.top,
                &mut visitor,
                &mut query_stack,
            );

            // edge midpoint of the hole not lying on any candidate boundary
            let n = hole.len();
            let midpoints = (0..n).map(|i| {
                let a = hole[i];
                let b = hole[(i + 1) % n];
                (a.x as i64 + b.x as i64, a.y as i64 + b.y as i64)
            });
            let mut probe = None;
            for (px2, py2) in midpoints {
                if probe.is_none() {
                    probe = Some((px2, py2));
                }
                if !candidates.iter().any(|&c| on_ring2(&hulls[c], px2, py2)) {
                    probe = Some((px2, py2));
                    break;
                }
            }
            let (px2, py2) = probe?;

            candidates
                .iter()
                .copied()
                .filter(|&c| winding_number2(&hulls[c], px2, py2) != 0)
                .min_by_key(|&c| areas[c])
        })
        .collect()
}

/// True if the direction from `ring[i]` towards `target` points into the interior at that
/// vertex (interior on the right of the ring).
fn locally_inside(ring: &[Point], i: usize, target: Point) -> bool {
    let n = ring.len();
    let p = ring[i];
    let prev = ring[(i + n - 1) % n];
    let next = ring[(i + 1) % n];
    cmp_ccw_angle(
        direction(p, prev),
        direction(p, target),
        direction(p, next),
    ) == Ordering::Less
}

/// Of all occurrences of the point at `ring[i]`, the first one from which `target` is inside.
fn pick_occurrence(ring: &[Point], i: usize, target: Point) -> usize {
    let p = ring[i];
    (0..ring.len())
        .filter(|&j| ring[j] == p)
        .find(|&j| locally_inside(ring, j, target))
        .unwrap_or(i)
}

enum Bridge {
    /// Connect to the ring vertex.
    Vertex(usize),
    /// The hole point lies on the interior of the ring edge starting at this vertex.
    Split(usize),
}

/// Find a ring vertex visible from `m` for bridging, `m` being the rightmost hole point.
fn find_bridge(ring: &[Point], m: Point) -> Option<Bridge> {
    let n = ring.len();
    // closest intersection of a ray to the right of m with the ring, x = num / den
    let mut best: Option<(i128, i128, usize)> = None;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y == b.y {
            continue;
        }
        let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };
        if m.y < lo.y || m.y > hi.y {
            continue;
        }
        let den = hi.y as i128 - lo.y as i128;
        let num = lo.x as i128 * den + (m.y as i128 - lo.y as i128) * (hi.x as i128 - lo.x as i128);
        if num < m.x as i128 * den {
            continue;
        }
        let closer = match best {
            Some((bn, bd, _)) => num * bd < bn * den,
            None => true,
        };
        if closer {
            best = Some((num, den, i));
        }
    }

    let (num, den, i) = best?;
    let j = (i + 1) % n;
    let (a, b) = (ring[i], ring[j]);
    let at = |p: Point| p.y == m.y && p.x as i128 * den == num;
    if at(a) {
        return Some(Bridge::Vertex(pick_occurrence(ring, i, m)));
    }
    if at(b) {
        return Some(Bridge::Vertex(pick_occurrence(ring, j, m)));
    }
    if num == m.x as i128 * den {
        return Some(Bridge::Split(i));
    }

    let (pi, q) = if a.x >= b.x { (i, b) } else { (j, a) };
    let p = ring[pi];
    let q_side = cross3(m, p, q).signum();
    let m_side = cross3(a, b, m).signum();
    let same_side = |s: i128, r: i128| s == 0 || s == r;

    // ring vertices inside the triangle (m, intersection, p) may hide p, take the one with the
    // smallest angle to the ray instead
    let mut choice = pi;
    for k in 0..n {
        let v = ring[k];
        if v == p || v.x <= m.x || v.x > p.x {
            continue;
        }
        let inside = (v.y as i64 - m.y as i64) * (p.y as i64 - m.y as i64) >= 0
            && same_side(cross3(a, b, v).signum(), m_side)
            && same_side(cross3(m, p, v).signum(), q_side);
        if !inside || !locally_inside(ring, k, m) {
            continue;
        }
        let c = ring[choice];
        // |dy_v| / dx_v < |dy_c| / dx_c
        let tan_v = (v.y as i128 - m.y as i128).abs() * (c.x as i128 - m.x as i128);
        let tan_c = (c.y as i128 - m.y as i128).abs() * (v.x as i128 - m.x as i128);
        if tan_v < tan_c || (tan_v == tan_c && v.x < c.x) {
            choice = k;
        }
    }

    if choice == pi {
        choice = pick_occurrence(ring, pi, m);
    }
    Some(Bridge::Vertex(choice))
}

/// Connect the holes to the hull with cut lines, resulting in a single contour. Holes are
/// processed right to left so each ray only meets the hull or holes already connected.
fn bridge_holes(hull: Vec<Point>, holes: Vec<Vec<Point>>) -> Vec<Point> {
    let mut ring = hull;
    let mut order: Vec<(usize, usize)> = holes
        .iter()
        .enumerate()
        .filter_map(|(hi, h)| {
            h.iter()
                .enumerate()
                .max_by(|(_, p), (_, q)| p.x.cmp(&q.x).then(q.y.cmp(&p.y)))
                .map(|(vi, _)| (hi, vi))
        })
        .collect();
    order.sort_by(|&(h1, v1), &(h2, v2)| {
        let (p, q) = (holes[h1][v1], holes[h2][v2]);
        q.x.cmp(&p.x).then(p.y.cmp(&q.y))
    });

    for (hi, vi) in order {
        let hole = &holes[hi];
        let m = hole[vi];
        let bridge = match find_bridge(&ring, m) {
            Some(b) => b,
            None => {
                log::warn!("no bridge found for hole at {}", m);
                continue;
            }
        };
        let (at, reconnect) = match bridge {
            Bridge::Vertex(k) => (k, Some(ring[k])),
            Bridge::Split(k) => (k, None),
        };
        let mut merged = Vec::with_capacity(ring.len() + hole.len() + 3);
        merged.extend_from_slice(&ring[..=at]);
        merged.extend(hole[vi..].iter().chain(hole[..vi].iter()).copied());
        merged.push(m);
        if let Some(p) = reconnect {
            merged.push(p);
        }
        merged.extend_from_slice(&ring[at + 1..]);
        merged.dedup();
        while merged.len() > 1 && merged.first() == merged.last() {
            merged.pop();
        }
        ring = merged;
    }

    ring
}
