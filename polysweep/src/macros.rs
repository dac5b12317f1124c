/// Used by the polygon macros to count repetitions for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a [Polygon](crate::geometry::Polygon) from a list of (x, y) hull points. The hull
/// is oriented clockwise.
///
/// # Examples
///
/// ```
/// # use polysweep::polygon;
/// # use polysweep::geometry::*;
/// let p = polygon![(0, 0), (0, 10), (10, 10), (10, 0)];
/// assert_eq!(p.to_string(), "(0,0;0,10;10,10;10,0)");
/// assert_eq!(p.area2(), 200);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $x:expr ),* $(,)?) => {
        {
            use $crate::geometry::*;
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points: Vec<Point> = Vec::with_capacity(size);
            $(
                points.push(Point::new($x.0, $x.1));
            )*
            Polygon::new(points)
        }
    };
}

/// Construct a vector of [Edge](crate::geometry::Edge)s from (x1, y1, x2, y2) tuples.
///
/// # Examples
///
/// ```
/// # use polysweep::edges;
/// let e = edges![(0, 0, 0, 10), (0, 10, 5, 10)];
/// assert_eq!(e.len(), 2);
/// assert!(e[1].is_horizontal());
/// ```
#[macro_export]
macro_rules! edges {
    ($( $x:expr ),* $(,)?) => {
        {
            use $crate::geometry::*;
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut edges: Vec<Edge> = Vec::with_capacity(size);
            $(
                edges.push(Edge::from_coords($x.0, $x.1, $x.2, $x.3));
            )*
            edges
        }
    };
}
