mod test_utils;

use polysweep::{
    edge_processor::{internal::sweep::Procedure, EdgeProcessor},
    evaluators::{
        BooleanMode, BooleanOp, EdgeEvaluator, GenericMerge, MergeOp, Operator, PropertyId,
        SimpleMerge,
    },
    geometry::{Edge, Rect},
    sinks::{EdgeContainer, EdgeSink, PolygonGenerator, PolygonOptions},
};
use test_utils::{init_logging, rect, total_area2};

fn sorted(mut edges: Vec<Edge>) -> Vec<Edge> {
    edges.sort();
    edges
}

fn overlapping_pair() -> EdgeProcessor {
    let mut ep = EdgeProcessor::new();
    ep.insert_rect(&Rect::new(0, 0, 10, 10), 0);
    ep.insert_rect(&Rect::new(5, 5, 15, 15), 1);
    ep
}

#[test]
fn redo_with_other_operator() {
    init_logging();
    let mut ep = overlapping_pair();

    let mut and = EdgeContainer::new();
    ep.process(&mut and, &mut BooleanOp::new(BooleanMode::And));
    let mut or = EdgeContainer::new();
    ep.redo(&mut or, &mut BooleanOp::new(BooleanMode::Or));

    let a = [rect(0, 0, 10, 10)];
    let b = [rect(5, 5, 15, 15)];
    let mut fresh = EdgeProcessor::new();
    assert_eq!(
        sorted(and.into_edges()),
        sorted(fresh.boolean_to_edges(&a, &b, BooleanMode::And))
    );
    assert_eq!(
        sorted(or.into_edges()),
        sorted(fresh.boolean_to_edges(&a, &b, BooleanMode::Or))
    );
}

#[test]
#[should_panic]
fn redo_after_insert() {
    let mut ep = overlapping_pair();
    ep.process(&mut EdgeContainer::new(), &mut MergeOp::default());
    ep.insert_rect(&Rect::new(20, 20, 30, 30), 2);
    ep.redo(&mut EdgeContainer::new(), &mut MergeOp::default());
}

#[test]
#[should_panic]
fn redo_without_process() {
    let mut ep = overlapping_pair();
    ep.redo(&mut EdgeContainer::new(), &mut MergeOp::default());
}

#[test]
fn several_operators_in_one_sweep() {
    init_logging();
    let mut ep = overlapping_pair();
    let mut and_sink = EdgeContainer::new();
    let mut xor_sink = EdgeContainer::new();
    let mut merged = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
    {
        let mut and = BooleanOp::new(BooleanMode::And);
        let mut xor = Operator::Boolean(BooleanOp::new(BooleanMode::Xor));
        let mut merge = MergeOp::new(0);
        let mut procs: [Procedure<'_>; 3] = [
            (&mut and_sink, &mut and),
            (&mut xor_sink, &mut xor),
            (&mut merged, &mut merge),
        ];
        ep.process_all(&mut procs);
    }

    let a = [rect(0, 0, 10, 10)];
    let b = [rect(5, 5, 15, 15)];
    let mut single = EdgeProcessor::new();
    assert_eq!(
        sorted(and_sink.into_edges()),
        sorted(single.boolean_to_edges(&a, &b, BooleanMode::And))
    );
    assert_eq!(
        sorted(xor_sink.into_edges()),
        sorted(single.boolean_to_edges(&a, &b, BooleanMode::Xor))
    );
    let merged = merged.into_sink();
    assert_eq!(merged.len(), 1);
    assert_eq!(total_area2(&merged), 350);
}

#[test]
fn sink_stops_sweep() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    for i in 0..10 {
        ep.insert_rect(&Rect::new(0, 20 * i, 10, 20 * i + 10), 0);
    }

    let mut all = EdgeContainer::new();
    ep.process(&mut all, &mut SimpleMerge::default());
    assert_eq!(all.len(), 40);

    let mut first = EdgeContainer::new().with_stop_after(1);
    ep.redo(&mut first, &mut SimpleMerge::default());
    assert!(!first.is_empty());
    assert!(first.len() < 40);
    assert!(first.edges().iter().all(|e| e.lower().y == 0));
}

#[test]
fn progress_has_no_effect() {
    init_logging();
    let mut quiet = overlapping_pair();
    let mut noisy = overlapping_pair();
    noisy.enable_progress("merging");
    noisy.set_base_verbosity(20);
    assert_eq!(noisy.base_verbosity(), 20);

    let mut a = EdgeContainer::new();
    quiet.process(&mut a, &mut MergeOp::default());
    let mut b = EdgeContainer::new();
    noisy.process(&mut b, &mut MergeOp::default());
    noisy.disable_progress();
    assert_eq!(sorted(a.into_edges()), sorted(b.into_edges()));
}

#[test]
fn empty_input() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    assert!(ep.is_empty());
    let mut sink = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
    ep.process(&mut sink, &mut MergeOp::default());
    assert!(sink.into_sink().is_empty());
}

#[test]
fn clear_drops_edges() {
    init_logging();
    let mut ep = overlapping_pair();
    assert_eq!(ep.edge_count(), 8);
    ep.clear();
    assert!(ep.is_empty());
    let mut sink = EdgeContainer::new();
    ep.process(&mut sink, &mut MergeOp::default());
    assert!(sink.is_empty());
}

#[test]
fn degenerate_input_is_ignored() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    ep.insert_edge(Edge::from_coords(5, 5, 5, 5), 0);
    ep.insert_polygon(&rect(0, 0, 10, 10), 0);
    let mut sink = EdgeContainer::new();
    ep.process(&mut sink, &mut SimpleMerge::default());
    assert_eq!(sink.len(), 4);
}

#[test]
fn closure_wrap_rule() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    ep.insert_rect(&Rect::new(0, 0, 10, 10), 0);
    ep.insert_rect(&Rect::new(5, 0, 15, 10), 0);
    ep.insert_rect(&Rect::new(8, 0, 20, 10), 0);
    let mut generator = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
    ep.process(&mut generator, &mut GenericMerge::new(|wc: i32| wc >= 3));
    let result = generator.into_sink();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].to_string(), "(8,0;8,10;10,10;10,0)");
}

/// Counts the sweep events it sees and selects nothing.
#[derive(Default)]
struct EventCounter {
    resets: usize,
    groups: usize,
    north: usize,
    south: usize,
}

impl EdgeEvaluator for EventCounter {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn begin_group(&mut self) {
        self.groups += 1;
    }

    fn edge(&mut self, north: bool, _enter: bool, _prop: PropertyId) -> i32 {
        if north {
            self.north += 1;
        } else {
            self.south += 1;
        }
        0
    }
}

/// Records the calls of the sink protocol.
#[derive(Default)]
struct CallLog {
    started: usize,
    flushed: usize,
    put: usize,
}

impl EdgeSink for CallLog {
    fn start(&mut self) {
        self.started += 1;
    }

    fn flush(&mut self) {
        self.flushed += 1;
    }

    fn put(&mut self, _edge: &Edge) {
        self.put += 1;
    }
}

#[test]
fn custom_operator() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    ep.insert_rect(&Rect::new(0, 0, 10, 10), 0);

    let mut counter = EventCounter::default();
    let mut log = CallLog::default();
    {
        let mut op = Operator::Custom(&mut counter);
        ep.process(&mut log, &mut op);
    }
    assert_eq!((log.started, log.flushed, log.put), (1, 1, 0));

    // two scanlines, each with one reset during the sweep, plus the final one
    assert_eq!(counter.resets, 3);
    // both vertical edges start on the first scanline and end on the second
    assert_eq!(counter.north, 2);
    assert_eq!(counter.south, 2);
    assert_eq!(counter.groups, 4);
}
