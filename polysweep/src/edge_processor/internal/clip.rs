use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

use super::work_edge::WorkEdge;
use crate::{
    core::math::div_round,
    geometry::{Edge, Point},
};

/// Upper bound for the clip passes. Rounded intersection points may create new intersections,
/// in practice two or three passes settle.
const MAX_CLIP_PASSES: usize = 32;

/// Split the edges at all mutual intersections and touch points so that no two edges cross
/// except at common end points and collinear overlaps become identical segments.
///
/// Zero-length edges are dropped. Edge directions and properties are preserved.
pub fn clip_edges(mut edges: Vec<WorkEdge>) -> Vec<WorkEdge> {
    edges.retain(|e| !e.edge.is_degenerate());
    let mut query_stack = Vec::new();
    let mut candidates = Vec::new();

    for pass in 0..MAX_CLIP_PASSES {
        let index = build_index(&edges);
        let mut cuts: Vec<Vec<Point>> = vec![Vec::new(); edges.len()];
        let mut any_cut = false;

        for i in 0..edges.len() {
            let b = edges[i].edge.bbox();
            candidates.clear();
            let mut visitor = |j: usize| {
                if j > i {
                    candidates.push(j);
                }
            };
            index.visit_query_with_stack(
                b.left,
                b.bottom,
                b.right,
                b.top,
                &mut visitor,
                &mut query_stack,
            );

            for &j in candidates.iter() {
                let (e1, e2) = (edges[i].edge, edges[j].edge);
                for_each_cut(&e1, &e2, |on_first, p| {
                    let (k, e) = if on_first { (i, &e1) } else { (j, &e2) };
                    if p != e.p1 && p != e.p2 {
                        cuts[k].push(p);
                        any_cut = true;
                    }
                });
            }
        }

        if !any_cut {
            log::trace!("clipping settled after {} passes", pass + 1);
            return edges;
        }

        let mut split = Vec::with_capacity(edges.len() + cuts.iter().map(Vec::len).sum::<usize>());
        for (we, mut pts) in edges.into_iter().zip(cuts) {
            if pts.is_empty() {
                split.push(we);
                continue;
            }
            let e = we.edge;
            let (dx, dy) = (e.dx() as i128, e.dy() as i128);
            let param = |p: &Point| {
                (p.x as i128 - e.p1.x as i128) * dx + (p.y as i128 - e.p1.y as i128) * dy
            };
            pts.sort_by_key(|p| param(p));
            pts.dedup();
            let mut from = e.p1;
            for p in pts.into_iter().chain(std::iter::once(e.p2)) {
                if p != from {
                    split.push(WorkEdge::new(Edge::new(from, p), we.prop));
                    from = p;
                }
            }
        }
        edges = split;
    }

    log::warn!(
        "edge clipping did not settle after {} passes, output may contain crossings",
        MAX_CLIP_PASSES
    );
    edges
}

fn build_index(edges: &[WorkEdge]) -> StaticAABB2DIndex<i32> {
    let mut builder = StaticAABB2DIndexBuilder::new(edges.len());
    for e in edges {
        let b = e.edge.bbox();
        builder.add(b.left, b.bottom, b.right, b.top);
    }
    match builder.build() {
        Ok(index) => index,
        Err(e) => unreachable!("index built with matching item count: {:?}", e),
    }
}

/// Report the points where `e1` and `e2` have to be split. The callback receives `true` for
/// cuts on `e1` and `false` for cuts on `e2`.
fn for_each_cut<F>(e1: &Edge, e2: &Edge, mut cut: F)
where
    F: FnMut(bool, Point),
{
    let (a, b, c, d) = (e1.p1, e1.p2, e2.p1, e2.p2);
    let d1 = (b.x as i128 - a.x as i128, b.y as i128 - a.y as i128);
    let d2 = (d.x as i128 - c.x as i128, d.y as i128 - c.y as i128);
    let ac = (c.x as i128 - a.x as i128, c.y as i128 - a.y as i128);
    let cross = |u: (i128, i128), v: (i128, i128)| u.0 * v.1 - u.1 * v.0;

    let den = cross(d1, d2);
    if den == 0 {
        if cross(d1, ac) != 0 {
            // parallel
            return;
        }
        // collinear, split each at the other's end points
        for p in [c, d] {
            if e1.contains_interior(p) {
                cut(true, p);
            }
        }
        for p in [a, b] {
            if e2.contains_interior(p) {
                cut(false, p);
            }
        }
        return;
    }

    let (mut t, mut u, mut den) = (cross(ac, d2), cross(ac, d1), den);
    if den < 0 {
        t = -t;
        u = -u;
        den = -den;
    }
    if t < 0 || t > den || u < 0 || u > den {
        return;
    }

    let t_end = t == 0 || t == den;
    let u_end = u == 0 || u == den;
    match (t_end, u_end) {
        (true, true) => {}
        (false, true) => cut(true, if u == 0 { c } else { d }),
        (true, false) => cut(false, if t == 0 { a } else { b }),
        (false, false) => {
            let x = div_round(a.x as i128 * den + d1.0 * t, den);
            let y = div_round(a.y as i128 * den + d1.1 * t, den);
            let p = Point::new(x as i32, y as i32);
            cut(true, p);
            cut(false, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn we(x1: i32, y1: i32, x2: i32, y2: i32) -> WorkEdge {
        WorkEdge::new(Edge::from_coords(x1, y1, x2, y2), 0)
    }

    #[test]
    fn crossing_edges_are_split() {
        let out = clip_edges(vec![we(0, 0, 10, 10), we(0, 10, 10, 0)]);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|e| e.edge.p1 == Point::new(5, 5)
            || e.edge.p2 == Point::new(5, 5)));
    }

    #[test]
    fn collinear_overlap_becomes_identical() {
        let out = clip_edges(vec![we(0, 0, 0, 10), we(0, 5, 0, 15)]);
        let mut edges: Vec<Edge> = out.iter().map(|e| e.edge).collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                Edge::from_coords(0, 0, 0, 5),
                Edge::from_coords(0, 5, 0, 10),
                Edge::from_coords(0, 5, 0, 10),
                Edge::from_coords(0, 10, 0, 15),
            ]
        );
    }

    #[test]
    fn touching_end_point_splits() {
        let out = clip_edges(vec![we(0, 0, 10, 0), we(5, 0, 5, 5)]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn degenerate_edges_dropped() {
        assert!(clip_edges(vec![we(1, 1, 1, 1)]).is_empty());
    }
}
