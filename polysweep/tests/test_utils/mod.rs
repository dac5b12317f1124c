#![allow(dead_code)]
mod polygon_modifiers;
mod polygon_properties;

pub use polygon_modifiers::*;
pub use polygon_properties::*;

use polysweep::{
    edge_processor::EdgeProcessor,
    evaluators::BooleanMode,
    geometry::{Point, Polygon, Rect},
};

/// Route `log` output of the library through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rect(left: i32, bottom: i32, right: i32, top: i32) -> Polygon {
    Polygon::from_rect(&Rect::new(left, bottom, right, top))
}

pub fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Sum of the areas of all polygons, doubled to stay integral.
pub fn total_area2(polygons: &[Polygon]) -> i128 {
    polygons.iter().map(Polygon::area2).sum()
}

/// True if both polygon sets cover the same points (their symmetric difference is empty).
pub fn same_region(a: &[Polygon], b: &[Polygon]) -> bool {
    EdgeProcessor::new()
        .boolean_to_edges(a, b, BooleanMode::Xor)
        .is_empty()
}
