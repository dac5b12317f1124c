//! Operators deciding, event by event during the sweep, which edges belong to the output.
//!
//! Every operator implements [EdgeEvaluator]. The sweep drives it per scanline with the
//! following protocol:
//!
//! 1. [EdgeEvaluator::reset] at the start of each scanline, wrap counts go back to zero.
//! 2. [EdgeEvaluator::begin_group] before each distinct `x` position on the scanline.
//! 3. [EdgeEvaluator::edge] for every edge touching that position, first all edges coming from
//!    the south side, then all edges continuing to the north side. For north edges the return
//!    value is the change of the operator's inside state across the edge (`+1`, `-1` or `0`).
//!    Coincident north edges form a cluster, [EdgeEvaluator::end_cluster] follows each one.
//! 4. [EdgeEvaluator::select_edge] for edges starting at the position if the operator
//!    [selects edges](EdgeEvaluator::selects_edges) instead of producing boundary output.
//! 5. [EdgeEvaluator::compare_ns] after the position to find horizontal output along the
//!    scanline: `+1` if only the north side is inside, `-1` if only the south side is.
mod boolean;
mod edge_polygon;
mod inside_func;
mod interaction;
mod merge;
mod tagged_area;

pub use boolean::*;
pub use edge_polygon::*;
pub use inside_func::*;
pub use interaction::*;
pub use merge::*;
pub use tagged_area::*;

use crate::geometry::Edge;

/// Property id attached to every inserted edge.
pub type PropertyId = usize;

/// The operator protocol driven by the scanline sweep.
pub trait EdgeEvaluator {
    /// Zero all wrap counts.
    fn reset(&mut self) {}

    /// Hint for the number of distinct property ids (largest id + 1).
    fn reserve(&mut self, _n: usize) {}

    /// A new `x` position on the current scanline starts.
    fn begin_group(&mut self) {}

    /// Account for one edge event. `north` selects the side of the scanline the edge lies on,
    /// `enter` is true for edges pointing up. Returns the change of the north inside state.
    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32;

    /// All north edges of a cluster (edges sharing both end points) have been reported. The
    /// north state now describes the area right of the cluster.
    fn end_cluster(&mut self) {}

    /// Classify an edge starting at the current position (or lying on the scanline). A non-zero
    /// return value selects the edge for output with that value as tag.
    fn select_edge(&mut self, _edge: &Edge, _prop: PropertyId) -> i32 {
        0
    }

    /// North inside state minus south inside state at the current position.
    fn compare_ns(&self) -> i32 {
        0
    }

    /// True if no wrap count is non-zero, the rest of a scanline without events can be skipped.
    fn is_reset(&self) -> bool {
        false
    }

    /// If true, coincident edges are reported entering before leaving so touching regions
    /// momentarily count as connected.
    fn prefer_touch(&self) -> bool {
        false
    }

    /// If true, [EdgeEvaluator::select_edge] is used instead of the `edge` deltas for output.
    fn selects_edges(&self) -> bool {
        false
    }
}

impl<T> EdgeEvaluator for &mut T
where
    T: EdgeEvaluator + ?Sized,
{
    fn reset(&mut self) {
        (**self).reset()
    }
    fn reserve(&mut self, n: usize) {
        (**self).reserve(n)
    }
    fn begin_group(&mut self) {
        (**self).begin_group()
    }
    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        (**self).edge(north, enter, prop)
    }
    fn end_cluster(&mut self) {
        (**self).end_cluster()
    }
    fn select_edge(&mut self, edge: &Edge, prop: PropertyId) -> i32 {
        (**self).select_edge(edge, prop)
    }
    fn compare_ns(&self) -> i32 {
        (**self).compare_ns()
    }
    fn is_reset(&self) -> bool {
        (**self).is_reset()
    }
    fn prefer_touch(&self) -> bool {
        (**self).prefer_touch()
    }
    fn selects_edges(&self) -> bool {
        (**self).selects_edges()
    }
}

/// Closed set of the known operators, dispatched without virtual calls.
///
/// `Custom` takes any other [EdgeEvaluator] by reference.
pub enum Operator<'a> {
    Boolean(BooleanOp),
    Merge(MergeOp),
    SimpleMerge(SimpleMerge),
    Interaction(InteractionDetector),
    EdgePolygon(EdgePolygonOp),
    TaggedArea(TaggedAreaCollector<'a, f64>),
    Custom(&'a mut dyn EdgeEvaluator),
}

macro_rules! dispatch {
    ($self:expr, $op:ident => $body:expr) => {
        match $self {
            Operator::Boolean($op) => $body,
            Operator::Merge($op) => $body,
            Operator::SimpleMerge($op) => $body,
            Operator::Interaction($op) => $body,
            Operator::EdgePolygon($op) => $body,
            Operator::TaggedArea($op) => $body,
            Operator::Custom($op) => $body,
        }
    };
}

impl<'a> EdgeEvaluator for Operator<'a> {
    fn reset(&mut self) {
        dispatch!(self, op => op.reset())
    }
    fn reserve(&mut self, n: usize) {
        dispatch!(self, op => op.reserve(n))
    }
    fn begin_group(&mut self) {
        dispatch!(self, op => op.begin_group())
    }
    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        dispatch!(self, op => op.edge(north, enter, prop))
    }
    fn end_cluster(&mut self) {
        dispatch!(self, op => op.end_cluster())
    }
    fn select_edge(&mut self, edge: &Edge, prop: PropertyId) -> i32 {
        dispatch!(self, op => op.select_edge(edge, prop))
    }
    fn compare_ns(&self) -> i32 {
        dispatch!(self, op => op.compare_ns())
    }
    fn is_reset(&self) -> bool {
        dispatch!(self, op => op.is_reset())
    }
    fn prefer_touch(&self) -> bool {
        dispatch!(self, op => op.prefer_touch())
    }
    fn selects_edges(&self) -> bool {
        dispatch!(self, op => op.selects_edges())
    }
}

/// Per-property wrap counts together with the number of non-zero entries.
#[derive(Debug, Clone, Default)]
pub(crate) struct WrapCounts {
    counts: Vec<i32>,
    non_zero: usize,
}

impl WrapCounts {
    pub fn reserve(&mut self, n: usize) {
        if self.counts.len() < n {
            self.counts.resize(n, 0);
        }
    }

    /// Add `delta` to the count of `prop`, returns `(old, new)`.
    pub fn add(&mut self, prop: PropertyId, delta: i32) -> (i32, i32) {
        if prop >= self.counts.len() {
            self.counts.resize(prop + 1, 0);
        }
        let old = self.counts[prop];
        let new = old + delta;
        self.counts[prop] = new;
        if old == 0 && new != 0 {
            self.non_zero += 1;
        } else if old != 0 && new == 0 {
            self.non_zero -= 1;
        }
        (old, new)
    }

    #[inline]
    pub fn non_zero(&self) -> usize {
        self.non_zero
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.non_zero == 0
    }

    pub fn clear(&mut self) {
        if self.non_zero > 0 {
            self.counts.iter_mut().for_each(|c| *c = 0);
            self.non_zero = 0;
        }
    }
}

#[inline]
pub(crate) fn wrap_delta(enter: bool) -> i32 {
    if enter {
        1
    } else {
        -1
    }
}
