use super::{wrap_delta, EdgeEvaluator, InsideFunc, ParametrizedInsideFunc, PropertyId};
use crate::geometry::Edge;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which edges an [EdgePolygonOp] selects.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgePolygonMode {
    /// Edge parts inside the polygons, tag 1.
    Inside,
    /// Edge parts outside the polygons, tag 1.
    Outside,
    /// All edge parts, tag 1 for inside and tag 2 for outside.
    Both,
}

/// Classifies edges against polygons.
///
/// Edges with property 0 form the polygons (merged with the configured wrap rule), edges with
/// any other property are the edges to classify. The latter do not contribute to the wrap count.
/// Edge parts running along a polygon boundary count as inside if `include_touching` is set and
/// as outside otherwise.
#[derive(Debug, Clone)]
pub struct EdgePolygonOp {
    mode: EdgePolygonMode,
    include_touching: bool,
    rule: ParametrizedInsideFunc,
    wc_n: i32,
    wc_s: i32,
    wc_before: i32,
    fresh: bool,
}

impl EdgePolygonOp {
    pub fn new(mode: EdgePolygonMode, include_touching: bool) -> Self {
        Self::with_wrap_rule(mode, include_touching, ParametrizedInsideFunc::non_zero())
    }

    pub fn with_wrap_rule(
        mode: EdgePolygonMode,
        include_touching: bool,
        rule: ParametrizedInsideFunc,
    ) -> Self {
        Self {
            mode,
            include_touching,
            rule,
            wc_n: 0,
            wc_s: 0,
            wc_before: 0,
            fresh: true,
        }
    }

    #[inline]
    pub fn mode(&self) -> EdgePolygonMode {
        self.mode
    }

    fn classify(&self, side1: bool, side2: bool) -> i32 {
        let inside = match (side1, side2) {
            (true, true) => true,
            (false, false) => false,
            _ => self.include_touching,
        };
        match (self.mode, inside) {
            (EdgePolygonMode::Inside, true) => 1,
            (EdgePolygonMode::Outside, false) => 1,
            (EdgePolygonMode::Both, true) => 1,
            (EdgePolygonMode::Both, false) => 2,
            _ => 0,
        }
    }
}

impl EdgeEvaluator for EdgePolygonOp {
    fn reset(&mut self) {
        self.wc_n = 0;
        self.wc_s = 0;
        self.wc_before = 0;
        self.fresh = true;
    }

    fn begin_group(&mut self) {
        self.fresh = true;
    }

    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        if north && self.fresh {
            self.wc_before = self.wc_n;
            self.fresh = false;
        }
        if prop == 0 {
            if north {
                self.wc_n += wrap_delta(enter);
            } else {
                self.wc_s += wrap_delta(enter);
            }
        }
        0
    }

    fn select_edge(&mut self, edge: &Edge, prop: PropertyId) -> i32 {
        if edge.is_horizontal() {
            if prop == 0 {
                return 0;
            }
            return self.classify(self.rule.inside(self.wc_n), self.rule.inside(self.wc_s));
        }
        self.fresh = true;
        if prop == 0 {
            return 0;
        }
        self.classify(
            self.rule.inside(self.wc_before),
            self.rule.inside(self.wc_n),
        )
    }

    fn is_reset(&self) -> bool {
        self.wc_n == 0 && self.wc_s == 0
    }

    fn selects_edges(&self) -> bool {
        true
    }
}
