use std::cmp::Ordering;

use super::{
    progress::Progress,
    work_edge::{cmp_frac, cmp_slope, cmp_sweep_order, WorkEdge},
};
use crate::{
    core::math::div_round,
    evaluators::EdgeEvaluator,
    geometry::{Coord, Edge, Point},
    sinks::EdgeSink,
};

/// One operator together with the sink receiving its output.
pub type Procedure<'a> = (&'a mut dyn EdgeSink, &'a mut dyn EdgeEvaluator);

/// Intersection-free edges in sweep order. Built once per `process` and reused by `redo`.
#[derive(Debug, Clone, Default)]
pub struct SweepInput {
    /// Non-horizontal edges ordered by lower point and slope.
    edges: Vec<WorkEdge>,
    /// Horizontal edges ordered by `y` and left end.
    horizontals: Vec<WorkEdge>,
    scanlines: Vec<Coord>,
    prop_count: usize,
}

impl SweepInput {
    pub fn new(clipped: Vec<WorkEdge>) -> Self {
        let prop_count = clipped.iter().map(|e| e.prop + 1).max().unwrap_or(0);
        let (mut horizontals, mut edges): (Vec<_>, Vec<_>) =
            clipped.into_iter().partition(|e| e.is_horizontal());
        edges.sort_by(cmp_sweep_order);
        horizontals.sort_by_key(|e| (e.lo().y, e.lo().x, e.hi().x, e.prop));

        let mut scanlines: Vec<Coord> = edges
            .iter()
            .flat_map(|e| [e.lo().y, e.hi().y])
            .chain(horizontals.iter().map(|e| e.lo().y))
            .collect();
        scanlines.sort_unstable();
        scanlines.dedup();

        Self {
            edges,
            horizontals,
            scanlines,
            prop_count,
        }
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len() + self.horizontals.len()
    }

    #[inline]
    pub fn scanline_count(&self) -> usize {
        self.scanlines.len()
    }
}

/// Per procedure bookkeeping during one sweep.
struct ProcState {
    /// Output direction of every non-horizontal edge fixed when it started: `1` upward, `-1`
    /// downward, `0` not in the output. Only the first edge of a cluster of identical edges
    /// carries the status.
    status: Vec<i8>,
    /// Open horizontal output run: sign of `compare_ns` and start `x`.
    run: Option<(i32, Coord)>,
    selects: bool,
    prefer_touch: bool,
}

#[inline]
fn frac_to_coord(x: (i128, i128)) -> Coord {
    if x.1 == 1 {
        x.0 as Coord
    } else {
        div_round(x.0, x.1) as Coord
    }
}

struct Sweep<'i, 'p, 'a> {
    input: &'i SweepInput,
    procs: &'p mut [Procedure<'a>],
    states: Vec<ProcState>,
    active: Vec<usize>,
    next_active: Vec<usize>,
    north: Vec<usize>,
    members: Vec<usize>,
}

/// Run the scanline sweep over `input`, feeding every procedure.
pub fn sweep(input: &SweepInput, procs: &mut [Procedure<'_>], mut progress: Option<&mut Progress>) {
    let states = procs
        .iter()
        .map(|(_, op)| ProcState {
            status: vec![0; input.edges.len()],
            run: None,
            selects: op.selects_edges(),
            prefer_touch: op.prefer_touch(),
        })
        .collect();

    let mut runner = Sweep {
        input,
        procs,
        states,
        active: Vec::new(),
        next_active: Vec::new(),
        north: Vec::new(),
        members: Vec::new(),
    };

    for (sink, op) in runner.procs.iter_mut() {
        op.reserve(input.prop_count);
        sink.start();
    }

    let mut next_new = 0;
    let mut next_h = 0;
    for (si, &y) in input.scanlines.iter().enumerate() {
        if si > 0 && runner.procs.iter().all(|(sink, _)| sink.can_stop()) {
            log::debug!("sweep stopped by sinks at y = {}", y);
            break;
        }

        let new_start = next_new;
        while next_new < input.edges.len() && input.edges[next_new].lo().y == y {
            next_new += 1;
        }
        let h_start = next_h;
        while next_h < input.horizontals.len() && input.horizontals[next_h].lo().y == y {
            next_h += 1;
        }

        runner.scanline(y, new_start..next_new, h_start..next_h);

        if let Some(p) = progress.as_deref_mut() {
            p.set(si + 1);
        }
    }

    for (sink, op) in runner.procs.iter_mut() {
        op.reset();
        sink.flush();
    }
}

impl<'i, 'p, 'a> Sweep<'i, 'p, 'a> {
    fn scanline(
        &mut self,
        y: Coord,
        new_edges: std::ops::Range<usize>,
        horizontals: std::ops::Range<usize>,
    ) {
        let input = self.input;
        let edges = &input.edges;
        for (_, op) in self.procs.iter_mut() {
            op.reset();
        }

        let active = std::mem::take(&mut self.active);
        self.next_active.clear();
        let mut ends_left = active.iter().filter(|&&e| edges[e].hi().y == y).count();

        let mut ai = 0;
        let mut ni = new_edges.start;
        let mut hi = horizontals.start;
        loop {
            let ax = (ai < active.len()).then(|| edges[active[ai]].x_at(y));
            let nx = (ni < new_edges.end).then(|| (edges[ni].lo().x as i128, 1));
            let x = match (ax, nx) {
                (None, None) => break,
                (Some(a), None) => a,
                (None, Some(n)) => n,
                (Some(a), Some(n)) => {
                    if cmp_frac(a, n) == Ordering::Greater {
                        n
                    } else {
                        a
                    }
                }
            };

            if ni == new_edges.end
                && hi == horizontals.end
                && ends_left == 0
                && self.procs.iter().all(|(_, op)| op.is_reset())
            {
                // only edges passing through remain and no operator is inside anything
                let rest = &active[ai..];
                self.next_active.extend_from_slice(rest);
                for (sink, _) in self.procs.iter_mut() {
                    sink.skip_n(rest.len());
                }
                break;
            }

            while hi < horizontals.end
                && cmp_frac((input.horizontals[hi].lo().x as i128, 1), x) == Ordering::Less
            {
                self.select_horizontal(hi);
                hi += 1;
            }

            let s_from = ai;
            while ai < active.len() && cmp_frac(edges[active[ai]].x_at(y), x) == Ordering::Equal {
                ai += 1;
            }
            let n_from = ni;
            while ni < new_edges.end && cmp_frac((edges[ni].lo().x as i128, 1), x) == Ordering::Equal
            {
                ni += 1;
            }

            let south = &active[s_from..ai];
            ends_left -= south.iter().filter(|&&e| edges[e].hi().y == y).count();

            self.north.clear();
            self.north
                .extend(south.iter().copied().filter(|&e| edges[e].hi().y > y));
            self.north.extend(n_from..ni);
            let mut north = std::mem::take(&mut self.north);
            if ni > n_from && north.len() > ni - n_from {
                // edges passing through meet edges starting here, keep left to right order
                north.sort_by(|&a, &b| cmp_slope(&edges[a], &edges[b]));
            }
            self.group(y, x, south, &north);
            self.next_active.extend_from_slice(&north);
            self.north = north;
        }

        while hi < horizontals.end {
            self.select_horizontal(hi);
            hi += 1;
        }

        self.active = std::mem::take(&mut self.next_active);
        self.next_active = active;
    }

    /// Offer a horizontal edge lying in the current interval to operators selecting edges.
    fn select_horizontal(&mut self, index: usize) {
        let h = &self.input.horizontals[index];
        for ((sink, op), st) in self.procs.iter_mut().zip(self.states.iter()) {
            if st.selects {
                let tag = op.select_edge(&h.edge, h.prop);
                if tag != 0 {
                    sink.put_tagged(&h.edge, tag);
                }
            }
        }
    }

    /// Process all edges meeting the scanline at `x`.
    fn group(&mut self, y: Coord, x: (i128, i128), south: &[usize], north: &[usize]) {
        let edges = &self.input.edges;
        for ((sink, op), st) in self.procs.iter_mut().zip(self.states.iter_mut()) {
            op.begin_group();

            let mut touched = false;
            for &e in south {
                let we = &edges[e];
                op.edge(false, we.enter(), we.prop);
                if we.hi().y == y && st.status[e] != 0 {
                    touched = true;
                }
            }

            let mut c = 0;
            while c < north.len() {
                let first = &edges[north[c]];
                let mut c_end = c + 1;
                while c_end < north.len() && {
                    let other = &edges[north[c_end]];
                    other.lo() == first.lo() && other.hi() == first.hi()
                } {
                    c_end += 1;
                }
                let cluster = &north[c..c_end];
                c = c_end;

                self.members.clear();
                self.members.extend_from_slice(cluster);
                let prefer_touch = st.prefer_touch;
                self.members
                    .sort_by_key(|&e| edges[e].enter() != prefer_touch);

                let mut sum = 0;
                for &e in self.members.iter() {
                    sum += op.edge(true, edges[e].enter(), edges[e].prop);
                }
                op.end_cluster();

                if first.lo().y != y {
                    // passing through, the output was decided where the edge started
                    if let Some(out) = crossing_output(st, edges, cluster) {
                        sink.crossing_edge(&out);
                    }
                    continue;
                }

                if st.selects {
                    for &e in self.members.iter() {
                        let tag = op.select_edge(&edges[e].edge, edges[e].prop);
                        if tag != 0 {
                            sink.put_tagged(&edges[e].edge, tag);
                            st.status[e] = 1;
                        }
                    }
                } else if sum != 0 {
                    let up = first.upward();
                    let out = if sum > 0 { up } else { up.reversed() };
                    sink.put(&out);
                    st.status[cluster[0]] = sum.signum() as i8;
                    touched = true;
                }
            }

            if !st.selects {
                let cmp = op.compare_ns();
                if let Some((sign, start)) = st.run {
                    if sign != cmp || touched {
                        put_horizontal(&mut **sink, y, start, frac_to_coord(x), sign);
                        st.run = None;
                    }
                }
                if cmp != 0 && st.run.is_none() {
                    st.run = Some((cmp, frac_to_coord(x)));
                }
            }
        }
    }
}

fn crossing_output(st: &ProcState, edges: &[WorkEdge], cluster: &[usize]) -> Option<Edge> {
    if st.selects {
        return cluster
            .iter()
            .find(|&&e| st.status[e] != 0)
            .map(|&e| edges[e].edge);
    }
    match st.status[cluster[0]] {
        0 => None,
        s if s > 0 => Some(edges[cluster[0]].upward()),
        _ => Some(edges[cluster[0]].upward().reversed()),
    }
}

/// Emit a horizontal output edge between `x1` and `x2`, oriented so the inside is on its
/// right: right to left if the north side is inside (`sign > 0`).
fn put_horizontal(sink: &mut dyn EdgeSink, y: Coord, x1: Coord, x2: Coord, sign: i32) {
    if x1 == x2 {
        return;
    }
    let (l, r) = (Point::new(x1.min(x2), y), Point::new(x1.max(x2), y));
    let edge = if sign > 0 { Edge::new(r, l) } else { Edge::new(l, r) };
    sink.put(&edge);
}
