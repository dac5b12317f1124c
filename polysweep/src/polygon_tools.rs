//! Polygon queries built on the edge processor: cutting along a line and finding
//! self-overlapping or inversely oriented parts.
use crate::{
    edge_processor::EdgeProcessor,
    evaluators::{BooleanMode, BooleanOp, GenericMerge},
    geometry::{Coord, Edge, Point, Polygon},
    sinks::{PolygonGenerator, PolygonOptions},
};

/// Clamp an `i64` coordinate into the grid range.
fn clamp_coord(v: i64) -> Coord {
    v.clamp(Coord::MIN as i64, Coord::MAX as i64) as Coord
}

/// Half plane right of the infinite extension of `line`, as a quad large enough to cover
/// `polygon`. The corners are integer multiples of the line direction away from its start, so
/// the cut runs exactly along the line.
fn right_half_plane(polygon: &Polygon, line: &Edge) -> Option<Polygon> {
    let bbox = polygon.bbox()?;
    let (ux, uy) = (line.dx(), line.dy());
    if ux == 0 && uy == 0 {
        return None;
    }
    let p = line.p1;
    let len = (ux as f64).hypot(uy as f64);
    let reach = [
        bbox.lower_left(),
        bbox.upper_right(),
        Point::new(bbox.left, bbox.top),
        Point::new(bbox.right, bbox.bottom),
    ]
    .iter()
    .map(|c| (c.sq_distance(p) as f64).sqrt())
    .fold(0.0, f64::max);
    let k = (reach / len).ceil() as i64 + 1;

    // right-hand normal of the same length as the direction
    let (nx, ny) = (uy, -ux);
    let at = |a: i64, b: i64| {
        Point::new(
            clamp_coord(p.x as i64 + a * ux + b * nx),
            clamp_coord(p.y as i64 + a * uy + b * ny),
        )
    };
    Some(Polygon::new(vec![at(-k, 0), at(k, 0), at(k, k), at(-k, k)]))
}

/// The parts of `polygon` right of the infinite line through `line` (looking from `p1` to
/// `p2`). Parts touching the line from the left produce nothing.
pub fn cut_polygon(polygon: &Polygon, line: &Edge) -> Vec<Polygon> {
    let half_plane = match right_half_plane(polygon, line) {
        Some(h) => h,
        None => return Vec::new(),
    };
    let mut ep = EdgeProcessor::new();
    ep.insert_polygon(polygon, 0);
    ep.insert_polygon(&half_plane, 1);
    let mut generator = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
    ep.process(&mut generator, &mut BooleanOp::new(BooleanMode::And));
    generator.into_sink()
}

fn self_overlap_parts<F>(polygon: &Polygon, inside: F, parts: Option<&mut Vec<Polygon>>) -> bool
where
    F: Fn(i32) -> bool,
{
    let mut ep = EdgeProcessor::new();
    ep.insert_polygon(polygon, 0);
    let mut generator = PolygonGenerator::new(Vec::new(), PolygonOptions::new());
    ep.process(&mut generator, &mut GenericMerge::new(inside));
    let found = generator.into_sink();
    let any = !found.is_empty();
    if let Some(parts) = parts {
        parts.extend(found);
    }
    any
}

/// True if the polygon overlaps itself or has parts with inverse orientation. These parts are
/// appended to `parts` if given.
pub fn is_strange_polygon(polygon: &Polygon, parts: Option<&mut Vec<Polygon>>) -> bool {
    self_overlap_parts(polygon, |wc| wc < 0 || wc > 1, parts)
}

/// True if the polygon has parts with inverse orientation (negative wrap count). These parts are
/// appended to `parts` if given.
pub fn is_non_orientable_polygon(polygon: &Polygon, parts: Option<&mut Vec<Polygon>>) -> bool {
    self_overlap_parts(polygon, |wc| wc < 0, parts)
}
