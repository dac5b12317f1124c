use super::{wrap_delta, EdgeEvaluator, InsideFunc, ParametrizedInsideFunc, PropertyId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation between operand A (even property ids) and operand B (odd property ids).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanMode {
    /// Intersection of A and B.
    And,
    /// A with B removed.
    ANotB,
    /// B with A removed.
    BNotA,
    /// Symmetric difference.
    Xor,
    /// Union.
    Or,
}

impl BooleanMode {
    #[inline]
    pub fn combine(&self, a: bool, b: bool) -> bool {
        match self {
            BooleanMode::And => a && b,
            BooleanMode::ANotB => a && !b,
            BooleanMode::BNotA => b && !a,
            BooleanMode::Xor => a != b,
            BooleanMode::Or => a || b,
        }
    }
}

/// Boolean set operation operator.
///
/// The low bit of the property id selects the operand. Each operand keeps one wrap count per
/// scanline side, reduced to a boolean with its wrap rule (non-zero unless configured with
/// [BooleanOp::with_wrap_rules]).
#[derive(Debug, Clone)]
pub struct BooleanOp {
    mode: BooleanMode,
    rule_a: ParametrizedInsideFunc,
    rule_b: ParametrizedInsideFunc,
    wc_na: i32,
    wc_nb: i32,
    wc_sa: i32,
    wc_sb: i32,
}

impl BooleanOp {
    pub fn new(mode: BooleanMode) -> Self {
        Self::with_wrap_rules(
            mode,
            ParametrizedInsideFunc::non_zero(),
            ParametrizedInsideFunc::non_zero(),
        )
    }

    /// Boolean operation with individual wrap rules for the two operands.
    pub fn with_wrap_rules(
        mode: BooleanMode,
        rule_a: ParametrizedInsideFunc,
        rule_b: ParametrizedInsideFunc,
    ) -> Self {
        Self {
            mode,
            rule_a,
            rule_b,
            wc_na: 0,
            wc_nb: 0,
            wc_sa: 0,
            wc_sb: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> BooleanMode {
        self.mode
    }

    #[inline]
    fn result(&self, wc_a: i32, wc_b: i32) -> bool {
        self.mode
            .combine(self.rule_a.inside(wc_a), self.rule_b.inside(wc_b))
    }
}

impl EdgeEvaluator for BooleanOp {
    fn reset(&mut self) {
        self.wc_na = 0;
        self.wc_nb = 0;
        self.wc_sa = 0;
        self.wc_sb = 0;
    }

    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        let (wc_a, wc_b) = if north {
            (self.wc_na, self.wc_nb)
        } else {
            (self.wc_sa, self.wc_sb)
        };
        let before = self.result(wc_a, wc_b);

        let d = wrap_delta(enter);
        let (wc_a, wc_b) = if prop & 1 == 0 {
            (wc_a + d, wc_b)
        } else {
            (wc_a, wc_b + d)
        };
        if north {
            self.wc_na = wc_a;
            self.wc_nb = wc_b;
        } else {
            self.wc_sa = wc_a;
            self.wc_sb = wc_b;
        }

        let after = self.result(wc_a, wc_b);
        after as i32 - before as i32
    }

    fn compare_ns(&self) -> i32 {
        self.result(self.wc_na, self.wc_nb) as i32 - self.result(self.wc_sa, self.wc_sb) as i32
    }

    fn is_reset(&self) -> bool {
        self.wc_na == 0 && self.wc_nb == 0 && self.wc_sa == 0 && self.wc_sb == 0
    }

    fn prefer_touch(&self) -> bool {
        self.mode == BooleanMode::Or
    }
}
