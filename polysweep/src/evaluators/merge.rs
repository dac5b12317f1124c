use super::{
    wrap_delta, EdgeEvaluator, InsideFunc, ParametrizedInsideFunc, PropertyId, WrapCounts,
};

/// Merge operator over a single wrap count shared by all properties, with the inside decision
/// delegated to `F`.
#[derive(Debug, Clone)]
pub struct GenericMerge<F> {
    func: F,
    wc_n: i32,
    wc_s: i32,
}

/// [GenericMerge] with the wrap rule given as an integer mode, see [ParametrizedInsideFunc].
pub type SimpleMerge = GenericMerge<ParametrizedInsideFunc>;

impl<F> GenericMerge<F>
where
    F: InsideFunc,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            wc_n: 0,
            wc_s: 0,
        }
    }

    #[inline]
    pub fn inside_func(&self) -> &F {
        &self.func
    }
}

impl GenericMerge<ParametrizedInsideFunc> {
    /// Merge with the wrap rule selected by `mode` (0: even-odd, > 0: `wc >= mode`,
    /// < 0: `|wc| >= |mode|`).
    pub fn with_mode(mode: i32) -> Self {
        Self::new(ParametrizedInsideFunc::new(mode))
    }
}

impl Default for SimpleMerge {
    fn default() -> Self {
        Self::with_mode(-1)
    }
}

impl<F> EdgeEvaluator for GenericMerge<F>
where
    F: InsideFunc,
{
    fn reset(&mut self) {
        self.wc_n = 0;
        self.wc_s = 0;
    }

    fn edge(&mut self, north: bool, enter: bool, _prop: PropertyId) -> i32 {
        let wc = if north { &mut self.wc_n } else { &mut self.wc_s };
        let before = self.func.inside(*wc);
        *wc += wrap_delta(enter);
        let after = self.func.inside(*wc);
        after as i32 - before as i32
    }

    fn compare_ns(&self) -> i32 {
        self.func.inside(self.wc_n) as i32 - self.func.inside(self.wc_s) as i32
    }

    fn is_reset(&self) -> bool {
        self.wc_n == 0 && self.wc_s == 0
    }

    fn prefer_touch(&self) -> bool {
        true
    }
}

/// Merge operator counting distinct inputs.
///
/// Each property id is one input. A point is inside if more than `min_wc` distinct inputs
/// cover it (an input covers a point if its own wrap count there is non-zero), so
/// `min_wc == 0` is a plain union while `min_wc == 1` keeps only areas where at least two
/// different inputs overlap.
#[derive(Debug, Clone)]
pub struct MergeOp {
    min_wc: usize,
    wcv_n: WrapCounts,
    wcv_s: WrapCounts,
}

impl MergeOp {
    pub fn new(min_wc: usize) -> Self {
        Self {
            min_wc,
            wcv_n: WrapCounts::default(),
            wcv_s: WrapCounts::default(),
        }
    }

    #[inline]
    pub fn min_wc(&self) -> usize {
        self.min_wc
    }

    #[inline]
    fn inside(&self, wcv: &WrapCounts) -> bool {
        wcv.non_zero() > self.min_wc
    }
}

impl Default for MergeOp {
    fn default() -> Self {
        Self::new(0)
    }
}

impl EdgeEvaluator for MergeOp {
    fn reset(&mut self) {
        self.wcv_n.clear();
        self.wcv_s.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.wcv_n.reserve(n);
        self.wcv_s.reserve(n);
    }

    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        let min_wc = self.min_wc;
        let wcv = if north {
            &mut self.wcv_n
        } else {
            &mut self.wcv_s
        };
        let before = wcv.non_zero() > min_wc;
        wcv.add(prop, wrap_delta(enter));
        let after = wcv.non_zero() > min_wc;
        after as i32 - before as i32
    }

    fn compare_ns(&self) -> i32 {
        self.inside(&self.wcv_n) as i32 - self.inside(&self.wcv_s) as i32
    }

    fn is_reset(&self) -> bool {
        self.wcv_n.is_zero() && self.wcv_s.is_zero()
    }

    fn prefer_touch(&self) -> bool {
        true
    }
}
