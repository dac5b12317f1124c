use polysweep::geometry::{Point, Polygon};

/// Describes how a polygon of a [ModifiedPolygonSet] was derived from the original.
#[derive(Debug, Copy, Clone)]
pub struct ModifiedPolygonState {
    pub start_index: usize,
    pub inverted_direction: bool,
}

/// All variants of a polygon obtained by changing the contour start point and, optionally,
/// inverting the contour direction before construction.
pub struct ModifiedPolygonSet {
    hull: Vec<Point>,
    holes: Vec<Vec<Point>>,
    include_inverted: bool,
}

fn rotated(points: &[Point], start: usize, inverted: bool) -> Vec<Point> {
    let mut result: Vec<Point> = points[start..].iter().chain(points[..start].iter()).copied().collect();
    if inverted {
        result.reverse();
    }
    result
}

impl ModifiedPolygonSet {
    pub fn new(polygon: &Polygon, include_inverted: bool) -> Self {
        Self {
            hull: polygon.hull().to_vec(),
            holes: polygon.holes().to_vec(),
            include_inverted,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Polygon, &ModifiedPolygonState),
    {
        let directions: &[bool] = if self.include_inverted {
            &[false, true]
        } else {
            &[false]
        };
        for &inverted_direction in directions {
            for start_index in 0..self.hull.len() {
                let mut polygon = Polygon::new(rotated(&self.hull, start_index, inverted_direction));
                for h in &self.holes {
                    polygon.insert_hole(rotated(h, start_index % h.len(), inverted_direction));
                }
                visitor(
                    &polygon,
                    &ModifiedPolygonState {
                        start_index,
                        inverted_direction,
                    },
                );
            }
        }
    }
}
