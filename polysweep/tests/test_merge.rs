mod test_utils;

use polysweep::{
    edge_processor::EdgeProcessor,
    edges,
    geometry::{Edge, Polygon},
    polygon,
    sinks::PolygonOptions,
};
use test_utils::{
    create_property_set, init_logging, points, property_sets_match, rect, same_region,
    total_area2, ModifiedPolygonSet, PolygonProperties,
};

/// Twice the area enclosed by a set of edges with the interior on the right.
fn edges_area2(edges: &[Edge]) -> i128 {
    -edges
        .iter()
        .map(|e| e.p1.x as i128 * e.p2.y as i128 - e.p2.x as i128 * e.p1.y as i128)
        .sum::<i128>()
}

fn strip() -> Vec<Polygon> {
    vec![rect(0, 0, 10, 10), rect(5, 0, 15, 10), rect(10, 0, 20, 10)]
}

mod merge {
    use super::*;

    #[test]
    fn union_of_strip() {
        init_logging();
        let result = EdgeProcessor::new().merge(&strip(), 0, PolygonOptions::new());
        let expected = vec![PolygonProperties::new(4, 0, 400, 0, 0, 20, 10)];
        assert!(property_sets_match(&create_property_set(&result), &expected));
    }

    #[test]
    fn min_wc_keeps_overlaps() {
        init_logging();
        let mut ep = EdgeProcessor::new();
        let result = ep.merge(&strip(), 1, PolygonOptions::new());
        let expected = vec![PolygonProperties::new(4, 0, 200, 5, 0, 15, 10)];
        assert!(property_sets_match(&create_property_set(&result), &expected));

        // no point is covered by three of them
        assert!(ep.merge(&strip(), 2, PolygonOptions::new()).is_empty());
    }

    #[test]
    fn duplicates_count_individually() {
        init_logging();
        let r = rect(0, 0, 10, 10);
        let result = EdgeProcessor::new().merge(&[r.clone(), r.clone()], 1, PolygonOptions::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to_string(), r.to_string());
    }

    #[test]
    fn idempotent() {
        init_logging();
        let mut ep = EdgeProcessor::new();
        let input = vec![
            rect(0, 0, 10, 10),
            rect(5, 5, 15, 15),
            rect(20, 0, 30, 10),
            polygon![(0, 20), (10, 40), (20, 20)],
            rect(0, 0, 40, 50).with_hole(points(&[(1, 1), (39, 1), (39, 49), (1, 49)])),
        ];
        let once = ep.merge(&input, 0, PolygonOptions::new());
        let twice = ep.merge(&once, 0, PolygonOptions::new());
        assert!(property_sets_match(
            &create_property_set(&once),
            &create_property_set(&twice)
        ));
        assert!(same_region(&once, &twice));
    }

    #[test]
    fn hole_survives() {
        init_logging();
        let framed = rect(0, 0, 30, 30).with_hole(points(&[(10, 10), (20, 10), (20, 20), (10, 20)]));
        let expected = vec![PolygonProperties::new(8, 1, 1600, 0, 0, 30, 30)];
        ModifiedPolygonSet::new(&framed, true).accept_closure(&mut |p, state| {
            let result = EdgeProcessor::new().merge(std::slice::from_ref(p), 0, PolygonOptions::new());
            assert!(
                property_sets_match(&create_property_set(&result), &expected),
                "state: {:?}",
                state
            );
        });
    }

    #[test]
    fn touching_corners() {
        init_logging();
        let input = vec![rect(0, 0, 10, 10), rect(10, 10, 20, 20)];
        let mut ep = EdgeProcessor::new();

        let split = ep.merge(&input, 0, PolygonOptions::new().with_min_coherence(true));
        assert_eq!(split.len(), 2);

        let joined = ep.merge(&input, 0, PolygonOptions::new());
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].area2(), 400);
    }
}

mod simple_merge {
    use super::*;

    fn overlapping() -> Vec<Polygon> {
        vec![rect(0, 0, 10, 10), rect(5, 0, 15, 10)]
    }

    #[test]
    fn wrap_rules() {
        init_logging();
        let mut ep = EdgeProcessor::new();
        let options = PolygonOptions::new();

        let even_odd = ep.simple_merge(&overlapping(), 0, options);
        assert_eq!(even_odd.len(), 2);
        assert_eq!(total_area2(&even_odd), 200);

        assert_eq!(total_area2(&ep.simple_merge(&overlapping(), 1, options)), 300);
        assert_eq!(total_area2(&ep.simple_merge(&overlapping(), 2, options)), 100);
        assert_eq!(total_area2(&ep.simple_merge(&overlapping(), -1, options)), 300);
    }

    #[test]
    fn inverse_orientation() {
        init_logging();
        let ccw = edges![(0, 0, 10, 0), (10, 0, 10, 10), (10, 10, 0, 10), (0, 10, 0, 0)];
        let mut ep = EdgeProcessor::new();

        let non_zero = ep.simple_merge_edges_to_polygons(&ccw, -1, PolygonOptions::new());
        assert_eq!(non_zero.len(), 1);
        assert_eq!(non_zero[0].to_string(), "(0,0;0,10;10,10;10,0)");

        assert!(ep.simple_merge_edges(&ccw, 1).is_empty());
    }

    #[test]
    fn edges_and_polygons_agree() {
        init_logging();
        let input: Vec<Edge> = [
            rect(0, 0, 100, 100),
            rect(50, 50, 150, 150),
            polygon![(0, 100), (50, 200), (100, 100)],
        ]
        .iter()
        .flat_map(|p| p.edges().collect::<Vec<_>>())
        .collect();

        let mut ep = EdgeProcessor::new();
        for mode in [-1, 0, 1, 2] {
            let edges = ep.simple_merge_edges(&input, mode);
            let polygons =
                ep.simple_merge_edges_to_polygons(&input, mode, PolygonOptions::new());
            assert_eq!(edges_area2(&edges), total_area2(&polygons), "mode {}", mode);

            let from_edges = ep.simple_merge_edges_to_polygons(&edges, -1, PolygonOptions::new());
            assert!(same_region(&from_edges, &polygons), "mode {}", mode);
        }
    }

    #[test]
    fn output_is_intersection_free() {
        init_logging();
        let star = polygon![(0, 0), (50, 150), (100, 0), (-20, 100), (120, 100)];
        let mut ep = EdgeProcessor::new();
        let edges = ep.simple_merge_to_edges(&[star], -1);
        assert!(!edges.is_empty());
        for (i, a) in edges.iter().enumerate() {
            for b in &edges[i + 1..] {
                let crosses = a.side_of(b.p1).signum() * a.side_of(b.p2).signum() < 0
                    && b.side_of(a.p1).signum() * b.side_of(a.p2).signum() < 0;
                assert!(!crosses, "{} crosses {}", a, b);
            }
        }
    }
}
