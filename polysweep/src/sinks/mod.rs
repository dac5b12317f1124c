//! Consumers of the intersection-free edge stream produced by the sweep.
mod polygon_generator;

pub use polygon_generator::*;

use crate::geometry::{Edge, Polygon};

/// Receives the output of one operator during a sweep.
///
/// Every output edge is delivered once through [EdgeSink::put] (or [EdgeSink::put_tagged] for
/// operators selecting edges) at the scanline where it starts. Edges are never cut by other
/// output edges except at shared end points.
pub trait EdgeSink {
    /// A sweep starts.
    fn start(&mut self) {}

    /// The sweep is complete.
    fn flush(&mut self) {}

    fn put(&mut self, edge: &Edge);

    /// Output of an operator selecting edges, `tag` is the operator's classification.
    fn put_tagged(&mut self, edge: &Edge, _tag: i32) {
        self.put(edge);
    }

    /// An output edge passing through the current scanline without events. Informational.
    fn crossing_edge(&mut self, _edge: &Edge) {}

    /// `n` output edges were carried over a scanline without being inspected. Informational.
    fn skip_n(&mut self, _n: usize) {}

    /// If true the sweep is stopped after the current scanline.
    fn can_stop(&self) -> bool {
        false
    }
}

impl<T> EdgeSink for &mut T
where
    T: EdgeSink + ?Sized,
{
    fn start(&mut self) {
        (**self).start()
    }
    fn flush(&mut self) {
        (**self).flush()
    }
    fn put(&mut self, edge: &Edge) {
        (**self).put(edge)
    }
    fn put_tagged(&mut self, edge: &Edge, tag: i32) {
        (**self).put_tagged(edge, tag)
    }
    fn crossing_edge(&mut self, edge: &Edge) {
        (**self).crossing_edge(edge)
    }
    fn skip_n(&mut self, n: usize) {
        (**self).skip_n(n)
    }
    fn can_stop(&self) -> bool {
        (**self).can_stop()
    }
}

/// Sink collecting edges into a vector.
///
/// With a tag filter only tagged edges carrying that tag are kept, the others are forwarded to
/// the chained sink if there is one.
#[derive(Default)]
pub struct EdgeContainer<'a> {
    edges: Vec<Edge>,
    tag: Option<i32>,
    chained: Option<&'a mut dyn EdgeSink>,
    stop_after: Option<usize>,
    stop_requested: bool,
}

impl<'a> EdgeContainer<'a> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            tag: None,
            chained: None,
            stop_after: None,
            stop_requested: false,
        }
    }

    /// Keep only edges tagged with `tag`.
    pub fn with_tag(tag: i32) -> Self {
        Self {
            tag: Some(tag),
            ..Self::new()
        }
    }

    /// Keep edges tagged with `tag` and pass everything else on to `chained`.
    pub fn chained(tag: i32, chained: &'a mut dyn EdgeSink) -> Self {
        Self {
            tag: Some(tag),
            chained: Some(chained),
            ..Self::new()
        }
    }

    /// Ask the sweep to stop once at least `n` edges are collected.
    pub fn with_stop_after(mut self, n: usize) -> Self {
        self.stop_after = Some(n);
        self
    }

    /// Ask the sweep to stop after the current scanline.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn store(&mut self, edge: &Edge) {
        self.edges.push(*edge);
        if self.stop_after.map_or(false, |n| self.edges.len() >= n) {
            self.stop_requested = true;
        }
    }
}

impl<'a> EdgeSink for EdgeContainer<'a> {
    fn start(&mut self) {
        self.edges.clear();
        self.stop_requested = false;
        if let Some(c) = self.chained.as_mut() {
            c.start();
        }
    }

    fn flush(&mut self) {
        if let Some(c) = self.chained.as_mut() {
            c.flush();
        }
    }

    fn put(&mut self, edge: &Edge) {
        if self.tag.is_none() {
            self.store(edge);
        } else if let Some(c) = self.chained.as_mut() {
            c.put(edge);
        }
    }

    fn put_tagged(&mut self, edge: &Edge, tag: i32) {
        match self.tag {
            Some(t) if t != tag => {
                if let Some(c) = self.chained.as_mut() {
                    c.put_tagged(edge, tag);
                }
            }
            _ => self.store(edge),
        }
    }

    fn can_stop(&self) -> bool {
        self.stop_requested || self.chained.as_ref().map_or(false, |c| c.can_stop())
    }
}

/// Receives polygons assembled from output edges.
pub trait PolygonSink {
    fn start(&mut self) {}
    fn put_polygon(&mut self, polygon: Polygon);
    fn flush(&mut self) {}
}

impl PolygonSink for Vec<Polygon> {
    fn put_polygon(&mut self, polygon: Polygon) {
        self.push(polygon);
    }
}

impl<T> PolygonSink for &mut T
where
    T: PolygonSink + ?Sized,
{
    fn start(&mut self) {
        (**self).start()
    }
    fn put_polygon(&mut self, polygon: Polygon) {
        (**self).put_polygon(polygon)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_filter_forwards_other_tags() {
        let e1 = Edge::from_coords(0, 0, 0, 10);
        let e2 = Edge::from_coords(5, 0, 5, 10);
        let mut outside = EdgeContainer::new();
        {
            let mut inside = EdgeContainer::chained(1, &mut outside);
            inside.start();
            inside.put_tagged(&e1, 1);
            inside.put_tagged(&e2, 2);
            inside.flush();
            assert_eq!(inside.edges(), &[e1]);
        }
        assert_eq!(outside.edges(), &[e2]);
    }

    #[test]
    fn stop_after_requests_stop() {
        let mut c = EdgeContainer::new().with_stop_after(2);
        c.start();
        c.put(&Edge::from_coords(0, 0, 0, 1));
        assert!(!c.can_stop());
        c.put(&Edge::from_coords(1, 0, 1, 1));
        assert!(c.can_stop());
        c.start();
        assert!(!c.can_stop());
    }
}
