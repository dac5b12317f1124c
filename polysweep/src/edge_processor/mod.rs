//! The scanline edge processor: collects edges, removes intersections and sweeps the result
//! through operators.
mod convenience;
pub mod internal;

use std::time::Instant;

use self::internal::{
    clip::clip_edges,
    progress::Progress,
    sweep::{sweep, Procedure, SweepInput},
    work_edge::WorkEdge,
};
use crate::{
    evaluators::{EdgeEvaluator, PropertyId},
    geometry::{Edge, Polygon, Rect, SimplePolygon},
    sinks::EdgeSink,
};

/// Verbosity from which stage timings are logged at info instead of debug level.
const TIMING_VERBOSITY: i32 = 10;

/// Scanline processor for integer edges.
///
/// Edges are inserted with a property id. [EdgeProcessor::process] splits them at all mutual
/// intersections, sorts them and sweeps them through one or more operators, each paired with a
/// sink receiving its output. [EdgeProcessor::redo] sweeps the already prepared edges again with
/// other operators.
///
/// # Examples
///
/// ```
/// # use polysweep::edge_processor::EdgeProcessor;
/// # use polysweep::evaluators::SimpleMerge;
/// # use polysweep::geometry::*;
/// # use polysweep::sinks::*;
/// let mut ep = EdgeProcessor::new();
/// ep.insert_rect(&Rect::new(0, 0, 10, 10), 0);
/// ep.insert_rect(&Rect::new(5, 5, 15, 15), 0);
///
/// let mut generator = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
/// ep.process(&mut generator, &mut SimpleMerge::default());
/// let merged = generator.into_sink();
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].area2(), 2 * 175);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeProcessor {
    edges: Vec<WorkEdge>,
    prepared: Option<SweepInput>,
    progress: Option<String>,
    base_verbosity: i32,
}

impl EdgeProcessor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Report sweep progress through `log` under the given description.
    pub fn enable_progress(&mut self, description: &str) {
        self.progress = Some(description.to_string());
    }

    pub fn disable_progress(&mut self) {
        self.progress = None;
    }

    /// Stage timings are logged at info level once the base verbosity reaches 10, at debug level
    /// otherwise.
    pub fn set_base_verbosity(&mut self, verbosity: i32) {
        self.base_verbosity = verbosity;
    }

    #[inline]
    pub fn base_verbosity(&self) -> i32 {
        self.base_verbosity
    }

    /// Capacity hint for the number of edges to be inserted.
    pub fn reserve(&mut self, n: usize) {
        self.edges.reserve(n);
    }

    /// Number of inserted edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn insert_edge(&mut self, edge: Edge, prop: PropertyId) {
        self.prepared = None;
        self.edges.push(WorkEdge::new(edge, prop));
    }

    pub fn insert_edges<I>(&mut self, edges: I, prop: PropertyId)
    where
        I: IntoIterator<Item = Edge>,
    {
        self.prepared = None;
        self.edges
            .extend(edges.into_iter().map(|e| WorkEdge::new(e, prop)));
    }

    /// Insert all contour edges of a polygon.
    pub fn insert_polygon(&mut self, polygon: &Polygon, prop: PropertyId) {
        self.insert_edges(polygon.edges(), prop);
    }

    pub fn insert_simple_polygon(&mut self, polygon: &SimplePolygon, prop: PropertyId) {
        self.insert_edges(polygon.edges(), prop);
    }

    pub fn insert_rect(&mut self, rect: &Rect, prop: PropertyId) {
        self.insert_polygon(&Polygon::from_rect(rect), prop);
    }

    /// Insert polygons, all with the same property.
    pub fn insert_polygons<'a, I>(&mut self, polygons: I, prop: PropertyId)
    where
        I: IntoIterator<Item = &'a Polygon>,
    {
        for p in polygons {
            self.insert_polygon(p, prop);
        }
    }

    /// Drop all edges and prepared state.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.prepared = None;
    }

    /// Run a single operator, sending its output to `sink`.
    pub fn process<S, E>(&mut self, sink: &mut S, op: &mut E)
    where
        S: EdgeSink,
        E: EdgeEvaluator,
    {
        let mut procs: [Procedure<'_>; 1] = [(sink, op)];
        self.process_all(&mut procs);
    }

    /// Run several operators in one sweep, each with its own sink.
    pub fn process_all(&mut self, procs: &mut [Procedure<'_>]) {
        let level = self.timing_level();

        let start = Instant::now();
        let clipped = clip_edges(self.edges.clone());
        log::log!(
            level,
            "clip: {} edges into {} edges in {:?}",
            self.edges.len(),
            clipped.len(),
            start.elapsed()
        );

        let start = Instant::now();
        self.prepared = Some(SweepInput::new(clipped));
        log::log!(level, "sort: {:?}", start.elapsed());

        self.run(procs);
    }

    /// Sweep the edges prepared by the last [EdgeProcessor::process] again with another
    /// operator.
    ///
    /// # Panics
    ///
    /// If edges were inserted or cleared since the last `process`, or nothing was processed yet.
    pub fn redo<S, E>(&mut self, sink: &mut S, op: &mut E)
    where
        S: EdgeSink,
        E: EdgeEvaluator,
    {
        let mut procs: [Procedure<'_>; 1] = [(sink, op)];
        self.redo_all(&mut procs);
    }

    /// Multi-operator version of [EdgeProcessor::redo].
    pub fn redo_all(&mut self, procs: &mut [Procedure<'_>]) {
        assert!(
            self.prepared.is_some(),
            "redo requires a preceding process on unchanged edges"
        );
        self.run(procs);
    }

    fn run(&mut self, procs: &mut [Procedure<'_>]) {
        let level = self.timing_level();
        let input = match self.prepared.as_ref() {
            Some(input) => input,
            None => unreachable!("sweep input prepared before run"),
        };
        let mut progress = self
            .progress
            .as_deref()
            .map(|d| Progress::new(d, input.scanline_count()));

        let start = Instant::now();
        sweep(input, procs, progress.as_mut());
        log::log!(
            level,
            "sweep: {} edges, {} scanlines, {} operators in {:?}",
            input.edge_count(),
            input.scanline_count(),
            procs.len(),
            start.elapsed()
        );
    }

    fn timing_level(&self) -> log::Level {
        if self.base_verbosity >= TIMING_VERBOSITY {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}
