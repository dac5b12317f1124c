mod test_utils;

use polysweep::{
    edge_processor::EdgeProcessor,
    evaluators::{BooleanMode, InteractionDetector, InteractionMode},
    geometry::Polygon,
    sinks::EdgeContainer,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use test_utils::{init_logging, points, rect, total_area2};

fn primaries() -> Vec<Polygon> {
    vec![rect(0, 0, 10, 10)]
}

/// Overlapping, inside, outside and touching the primary, in that order.
fn secondaries() -> Vec<Polygon> {
    vec![
        rect(5, 5, 15, 15),
        rect(2, 2, 4, 4),
        rect(20, 20, 30, 30),
        rect(10, 0, 20, 10),
    ]
}

fn query(mode: InteractionMode, include_touching: bool) -> Vec<(usize, usize)> {
    EdgeProcessor::new().interactions(&primaries(), &secondaries(), mode, include_touching)
}

#[test]
fn interacting() {
    init_logging();
    assert_eq!(query(InteractionMode::Interacting, false), vec![(0, 0), (0, 1)]);
    assert_eq!(
        query(InteractionMode::Interacting, true),
        vec![(0, 0), (0, 1), (0, 3)]
    );
}

#[test]
fn inside() {
    init_logging();
    assert_eq!(query(InteractionMode::Inside, false), vec![(0, 1)]);
}

#[test]
fn outside() {
    init_logging();
    assert_eq!(query(InteractionMode::Outside, false), vec![(2, 2), (3, 3)]);
    assert_eq!(query(InteractionMode::Outside, true), vec![(2, 2)]);
}

#[test]
fn enclosing() {
    init_logging();
    let result = EdgeProcessor::new().interactions(
        &[rect(2, 2, 4, 4), rect(50, 50, 60, 60)],
        &[rect(0, 0, 10, 10), rect(20, 0, 30, 10)],
        InteractionMode::Enclosing,
        false,
    );
    assert_eq!(result, vec![(0, 0)]);
}

#[test]
fn no_primaries() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    assert_eq!(
        ep.interactions(&[], &secondaries(), InteractionMode::Outside, false),
        vec![(0, 0), (1, 1), (2, 2), (3, 3)]
    );
    assert!(ep
        .interactions(&[], &secondaries(), InteractionMode::Interacting, true)
        .is_empty());
}

#[test]
fn all_primaries() {
    init_logging();
    let mut ep = EdgeProcessor::new();
    ep.insert_polygon(&rect(0, 0, 10, 10), 0);
    ep.insert_polygon(&rect(5, 5, 15, 15), 1);
    ep.insert_polygon(&rect(12, 12, 20, 20), 2);
    ep.insert_polygon(&rect(40, 0, 50, 10), 3);

    let mut detector = InteractionDetector::new(InteractionMode::Interacting, false);
    ep.process(&mut EdgeContainer::new(), &mut detector);
    detector.finish();
    assert_eq!(
        detector.iter().copied().collect::<Vec<_>>(),
        vec![(0, 1), (1, 2)]
    );
}

#[test]
fn mode_codes() {
    for mode in [
        InteractionMode::Interacting,
        InteractionMode::Outside,
        InteractionMode::Inside,
        InteractionMode::Enclosing,
    ] {
        assert_eq!(InteractionMode::from_mode(mode.mode()), Some(mode));
    }
    assert_eq!(InteractionMode::from_mode(3), None);
}

/// Triangle standing on its lowest vertex, both sides start at `(x, y)`.
fn wedge(x: i32, y: i32) -> Polygon {
    Polygon::new(points(&[(x, y), (x - 10, y + 10), (x + 10, y + 10)]))
}

mod shared_vertex {
    use super::*;

    fn run(
        primaries: &[Polygon],
        secondaries: &[Polygon],
        mode: InteractionMode,
        include_touching: bool,
    ) -> Vec<(usize, usize)> {
        init_logging();
        EdgeProcessor::new().interactions(primaries, secondaries, mode, include_touching)
    }

    #[test]
    fn triangle_inside_box() {
        let boxes = [rect(-100, -100, 100, 100)];
        let triangles = [wedge(0, 0)];
        assert_eq!(
            run(&boxes, &triangles, InteractionMode::Interacting, false),
            vec![(0, 0)]
        );
        assert_eq!(
            run(&boxes, &triangles, InteractionMode::Interacting, true),
            vec![(0, 0)]
        );
        assert_eq!(
            run(&boxes, &triangles, InteractionMode::Inside, false),
            vec![(0, 0)]
        );
        assert!(run(&boxes, &triangles, InteractionMode::Outside, false).is_empty());
        assert!(run(&boxes, &triangles, InteractionMode::Enclosing, false).is_empty());
        assert_eq!(
            run(&triangles, &boxes, InteractionMode::Enclosing, false),
            vec![(0, 0)]
        );
    }

    #[test]
    fn identical_triangles() {
        let a = [wedge(0, 0)];
        let b = [wedge(0, 0)];
        assert_eq!(run(&a, &b, InteractionMode::Interacting, false), vec![(0, 0)]);
        assert_eq!(run(&a, &b, InteractionMode::Inside, false), vec![(0, 0)]);
        assert_eq!(run(&a, &b, InteractionMode::Enclosing, false), vec![(0, 0)]);
        assert!(run(&a, &b, InteractionMode::Outside, false).is_empty());
    }

    #[test]
    fn disjoint_triangle_is_outside() {
        let boxes = [rect(-100, -100, 100, 100)];
        assert_eq!(
            run(&boxes, &[wedge(500, 0)], InteractionMode::Outside, false),
            vec![(0, 0)]
        );
        assert_eq!(
            run(&boxes, &[wedge(0, 0), wedge(500, 0)], InteractionMode::Outside, false),
            vec![(1, 1)]
        );
        assert!(run(&boxes, &[wedge(500, 0)], InteractionMode::Interacting, true).is_empty());
    }
}

fn random_triangle(rng: &mut StdRng) -> Polygon {
    loop {
        let t = Polygon::new(points(&[
            (rng.gen_range(0..100), rng.gen_range(0..100)),
            (rng.gen_range(0..100), rng.gen_range(0..100)),
            (rng.gen_range(0..100), rng.gen_range(0..100)),
        ]));
        if total_area2(std::slice::from_ref(&t)) != 0 {
            return t;
        }
    }
}

#[test]
fn random_triangles_agree_with_boolean() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut ep = EdgeProcessor::new();
    for _ in 0..200 {
        let a = [random_triangle(&mut rng)];
        let b = [random_triangle(&mut rng)];
        let overlap = !ep.boolean_to_edges(&a, &b, BooleanMode::And).is_empty();
        let b_outside_a = !ep.boolean_to_edges(&a, &b, BooleanMode::BNotA).is_empty();

        let interacting = ep.interactions(&a, &b, InteractionMode::Interacting, false);
        assert_eq!(!interacting.is_empty(), overlap, "a: {}, b: {}", a[0], b[0]);

        let inside = ep.interactions(&a, &b, InteractionMode::Inside, false);
        assert_eq!(
            !inside.is_empty(),
            overlap && !b_outside_a,
            "a: {}, b: {}",
            a[0],
            b[0]
        );

        let outside = ep.interactions(&a, &b, InteractionMode::Outside, false);
        assert_eq!(
            !outside.is_empty(),
            !overlap && b_outside_a,
            "a: {}, b: {}",
            a[0],
            b[0]
        );
    }
}
