//! Polygon level operations built on the processor: merge, booleans, sizing and interactions.
//!
//! Each operation clears the processor first, so one processor can serve many calls.
use super::EdgeProcessor;
use crate::{
    error::Result,
    evaluators::{
        BooleanMode, BooleanOp, InteractionDetector, InteractionMode, MergeOp, SimpleMerge,
    },
    geometry::{Edge, Polygon},
    sinks::{EdgeContainer, PolygonGenerator, PolygonOptions},
    sizing::{check_sizing, sized_contour_edges},
};

impl EdgeProcessor {
    fn run_to_edges<E>(&mut self, op: &mut E) -> Vec<Edge>
    where
        E: crate::evaluators::EdgeEvaluator,
    {
        let mut container = EdgeContainer::new();
        self.process(&mut container, op);
        container.into_edges()
    }

    fn run_to_polygons<E>(&mut self, op: &mut E, options: PolygonOptions) -> Vec<Polygon>
    where
        E: crate::evaluators::EdgeEvaluator,
    {
        let mut generator = PolygonGenerator::new(Vec::new(), options);
        self.process(&mut generator, op);
        generator.into_sink()
    }

    fn insert_indexed(&mut self, polygons: &[Polygon]) {
        self.clear();
        self.reserve(polygons.iter().map(Polygon::vertex_count).sum());
        for (i, p) in polygons.iter().enumerate() {
            self.insert_polygon(p, i);
        }
    }

    fn insert_same(&mut self, polygons: &[Polygon]) {
        self.clear();
        self.reserve(polygons.iter().map(Polygon::vertex_count).sum());
        self.insert_polygons(polygons, 0);
    }

    /// Merge polygons, keeping areas covered by more than `min_wc` distinct input polygons.
    /// With `min_wc == 0` this is the plain union.
    pub fn merge(
        &mut self,
        polygons: &[Polygon],
        min_wc: usize,
        options: PolygonOptions,
    ) -> Vec<Polygon> {
        self.insert_indexed(polygons);
        self.run_to_polygons(&mut MergeOp::new(min_wc), options)
    }

    /// [EdgeProcessor::merge] delivering the output edges.
    pub fn merge_to_edges(&mut self, polygons: &[Polygon], min_wc: usize) -> Vec<Edge> {
        self.insert_indexed(polygons);
        self.run_to_edges(&mut MergeOp::new(min_wc))
    }

    /// Merge polygons with a single wrap count and the wrap rule given by `mode`, see
    /// [ParametrizedInsideFunc](crate::evaluators::ParametrizedInsideFunc).
    pub fn simple_merge(
        &mut self,
        polygons: &[Polygon],
        mode: i32,
        options: PolygonOptions,
    ) -> Vec<Polygon> {
        self.insert_same(polygons);
        self.run_to_polygons(&mut SimpleMerge::with_mode(mode), options)
    }

    /// [EdgeProcessor::simple_merge] delivering the output edges.
    pub fn simple_merge_to_edges(&mut self, polygons: &[Polygon], mode: i32) -> Vec<Edge> {
        self.insert_same(polygons);
        self.run_to_edges(&mut SimpleMerge::with_mode(mode))
    }

    /// Merge a set of edges into a clean, intersection-free edge set.
    pub fn simple_merge_edges(&mut self, edges: &[Edge], mode: i32) -> Vec<Edge> {
        self.clear();
        self.insert_edges(edges.iter().copied(), 0);
        self.run_to_edges(&mut SimpleMerge::with_mode(mode))
    }

    /// Merge a set of edges into polygons.
    pub fn simple_merge_edges_to_polygons(
        &mut self,
        edges: &[Edge],
        mode: i32,
        options: PolygonOptions,
    ) -> Vec<Polygon> {
        self.clear();
        self.insert_edges(edges.iter().copied(), 0);
        self.run_to_polygons(&mut SimpleMerge::with_mode(mode), options)
    }

    fn insert_operands(&mut self, a: &[Polygon], b: &[Polygon]) {
        self.clear();
        self.reserve(
            a.iter()
                .chain(b.iter())
                .map(Polygon::vertex_count)
                .sum(),
        );
        self.insert_polygons(a, 0);
        self.insert_polygons(b, 1);
    }

    /// Boolean operation between the polygon sets `a` and `b`.
    pub fn boolean(
        &mut self,
        a: &[Polygon],
        b: &[Polygon],
        mode: BooleanMode,
        options: PolygonOptions,
    ) -> Vec<Polygon> {
        self.insert_operands(a, b);
        self.run_to_polygons(&mut BooleanOp::new(mode), options)
    }

    /// [EdgeProcessor::boolean] delivering the output edges.
    pub fn boolean_to_edges(&mut self, a: &[Polygon], b: &[Polygon], mode: BooleanMode) -> Vec<Edge> {
        self.insert_operands(a, b);
        self.run_to_edges(&mut BooleanOp::new(mode))
    }

    /// Boolean operation between two edge sets, each forming closed contours.
    pub fn boolean_edges(&mut self, a: &[Edge], b: &[Edge], mode: BooleanMode) -> Vec<Edge> {
        self.clear();
        self.reserve(a.len() + b.len());
        self.insert_edges(a.iter().copied(), 0);
        self.insert_edges(b.iter().copied(), 1);
        self.run_to_edges(&mut BooleanOp::new(mode))
    }

    fn insert_sized(&mut self, polygons: &[Polygon], dx: i32, dy: i32) -> Result<()> {
        check_sizing(dx, dy)?;
        self.clear();
        for p in polygons {
            self.insert_edges(sized_contour_edges(p, dx, dy)?, 0);
        }
        Ok(())
    }

    /// Grow (positive) or shrink (negative) polygons by `dx` horizontally and `dy` vertically.
    /// The result is merged.
    ///
    /// Fails with [Error::InconsistentSizing](crate::Error::InconsistentSizing) if `dx` and `dy`
    /// have opposite signs.
    pub fn size(
        &mut self,
        polygons: &[Polygon],
        dx: i32,
        dy: i32,
        options: PolygonOptions,
    ) -> Result<Vec<Polygon>> {
        self.insert_sized(polygons, dx, dy)?;
        Ok(self.run_to_polygons(&mut SimpleMerge::with_mode(1), options))
    }

    /// [EdgeProcessor::size] delivering the output edges.
    pub fn size_to_edges(&mut self, polygons: &[Polygon], dx: i32, dy: i32) -> Result<Vec<Edge>> {
        self.insert_sized(polygons, dx, dy)?;
        Ok(self.run_to_edges(&mut SimpleMerge::with_mode(1)))
    }

    /// Relations between `primaries` and `secondaries` as pairs of indexes into the two slices.
    ///
    /// For [InteractionMode::Outside] the pairs are `(s, s)` for every secondary `s` not
    /// overlapping any primary. `include_touching` makes touching polygons count as interacting
    /// (and as not outside).
    pub fn interactions(
        &mut self,
        primaries: &[Polygon],
        secondaries: &[Polygon],
        mode: InteractionMode,
        include_touching: bool,
    ) -> Vec<(usize, usize)> {
        let np = primaries.len();
        if np == 0 {
            return match mode {
                InteractionMode::Outside => (0..secondaries.len()).map(|s| (s, s)).collect(),
                _ => Vec::new(),
            };
        }

        self.clear();
        for (i, p) in primaries.iter().chain(secondaries.iter()).enumerate() {
            self.insert_polygon(p, i);
        }

        let mut detector = InteractionDetector::new(mode, include_touching);
        detector.set_last_primary_id(np - 1);
        let mut sink = EdgeContainer::new();
        self.process(&mut sink, &mut detector);
        detector.finish();

        detector
            .iter()
            .map(|&(a, b)| match mode {
                InteractionMode::Outside => (a - np, b - np),
                _ => (a, b - np),
            })
            .collect()
    }
}
