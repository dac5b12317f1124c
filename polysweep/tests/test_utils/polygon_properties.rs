use polysweep::geometry::{Polygon, Rect};

/// Holds a set of properties of a polygon for comparison in tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PolygonProperties {
    pub vertex_count: usize,
    pub hole_count: usize,
    pub area2: i128,
    pub extents: Rect,
}

impl PolygonProperties {
    pub fn new(
        vertex_count: usize,
        hole_count: usize,
        area2: i128,
        left: i32,
        bottom: i32,
        right: i32,
        top: i32,
    ) -> Self {
        Self {
            vertex_count,
            hole_count,
            area2,
            extents: Rect::new(left, bottom, right, top),
        }
    }

    pub fn from_polygon(polygon: &Polygon) -> Self {
        Self {
            vertex_count: polygon.vertex_count(),
            hole_count: polygon.hole_count(),
            area2: polygon.area2(),
            extents: polygon.bbox().unwrap_or_else(|| Rect::new(0, 0, 0, 0)),
        }
    }
}

pub fn create_property_set(polygons: &[Polygon]) -> Vec<PolygonProperties> {
    polygons.iter().map(PolygonProperties::from_polygon).collect()
}

/// True if both sets hold the same properties, in any order.
pub fn property_sets_match(result: &[PolygonProperties], expected: &[PolygonProperties]) -> bool {
    if result.len() != expected.len() {
        return false;
    }
    let mut used = vec![false; expected.len()];
    result.iter().all(|r| {
        match expected
            .iter()
            .enumerate()
            .find(|(i, e)| !used[*i] && *e == r)
        {
            Some((i, _)) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}
