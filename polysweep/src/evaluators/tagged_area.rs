use num_traits::Float;

use super::{wrap_delta, EdgeEvaluator, PropertyId, WrapCounts};
use crate::{
    bit_set::{BitSet, BitSetMap},
    geometry::Edge,
};

/// Receives partial areas attributed to the values of a [BitSetMap].
pub trait TaggedAreaReceiver<V> {
    fn add_area(&mut self, area: f64, value: &V);
}

/// Receiver summing `area * value` over all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalAreaReceiver<V> {
    total: V,
}

impl<V> TotalAreaReceiver<V>
where
    V: Float,
{
    pub fn new() -> Self {
        Self { total: V::zero() }
    }

    #[inline]
    pub fn total(&self) -> V {
        self.total
    }
}

impl<V> TaggedAreaReceiver<V> for TotalAreaReceiver<V>
where
    V: Float,
{
    fn add_area(&mut self, area: f64, value: &V) {
        let area = V::from(area).unwrap_or_else(V::nan);
        self.total = self.total + area * *value;
    }
}

/// Attributes the area covered by each combination of inputs to the matching map values.
///
/// Each property id is one bit of the combination. For every non-horizontal edge starting on a
/// scanline, the trapezoid between the edge and `x = 0` is reported negatively for the
/// combination left of the edge and positively for the one right of it. Summed over the sweep
/// this yields the exact area of every combination.
pub struct TaggedAreaCollector<'a, V> {
    map: &'a BitSetMap<V>,
    receiver: &'a mut dyn TaggedAreaReceiver<V>,
    wcv: WrapCounts,
    state: BitSet,
    prev: BitSet,
}

impl<'a, V> TaggedAreaCollector<'a, V> {
    /// `map` must be sorted.
    pub fn new(map: &'a BitSetMap<V>, receiver: &'a mut dyn TaggedAreaReceiver<V>) -> Self {
        assert!(map.is_sorted(), "tagged area map must be sorted");
        Self {
            map,
            receiver,
            wcv: WrapCounts::default(),
            state: BitSet::new(),
            prev: BitSet::new(),
        }
    }

    fn report(&mut self, edge: &Edge) {
        let lower = edge.lower();
        let upper = edge.upper();
        let h = (upper.y as i64 - lower.y as i64) as f64;
        let a = -((lower.x as i64 + upper.x as i64) as f64) * h * 0.5;

        let receiver = &mut *self.receiver;
        if !self.prev.is_empty() {
            self.map.lookup(&self.prev, |v| receiver.add_area(-a, v));
        }
        if !self.state.is_empty() {
            self.map.lookup(&self.state, |v| receiver.add_area(a, v));
        }
    }
}

impl<'a, V> EdgeEvaluator for TaggedAreaCollector<'a, V> {
    fn reset(&mut self) {
        self.wcv.clear();
        self.state.clear();
        self.prev.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.wcv.reserve(n);
    }

    fn begin_group(&mut self) {
        self.prev.clone_from(&self.state);
    }

    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        if north {
            let (_, new) = self.wcv.add(prop, wrap_delta(enter));
            if new != 0 {
                self.state.set(prop);
            } else {
                self.state.reset(prop);
            }
        }
        0
    }

    fn select_edge(&mut self, edge: &Edge, _prop: PropertyId) -> i32 {
        if edge.is_horizontal() {
            return 0;
        }
        if self.prev != self.state {
            self.report(edge);
            self.prev.clone_from(&self.state);
        }
        0
    }

    fn is_reset(&self) -> bool {
        self.state.is_empty()
    }

    fn selects_edges(&self) -> bool {
        true
    }
}
