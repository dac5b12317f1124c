//! Predicates reducing an integer wrap count to "inside" or "outside".

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decides whether a wrap count denotes the inside of a region.
///
/// Implemented for the predefined rules below and for any `Fn(i32) -> bool` closure. All rules
/// are expected to report a wrap count of zero as outside.
pub trait InsideFunc {
    fn inside(&self, wc: i32) -> bool;
}

impl<F> InsideFunc for F
where
    F: Fn(i32) -> bool,
{
    #[inline]
    fn inside(&self, wc: i32) -> bool {
        self(wc)
    }
}

/// Non-zero wrap count rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonZeroInsideFunc;

impl InsideFunc for NonZeroInsideFunc {
    #[inline]
    fn inside(&self, wc: i32) -> bool {
        wc != 0
    }
}

/// Even-odd (alternating) rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvenOddInsideFunc;

impl InsideFunc for EvenOddInsideFunc {
    #[inline]
    fn inside(&self, wc: i32) -> bool {
        wc % 2 != 0
    }
}

/// Wrap count rule selected by an integer mode.
///
/// * `mode == 0`: even-odd
/// * `mode > 0`: inside if `wc >= mode`
/// * `mode < 0`: inside if `|wc| >= |mode|`, i.e. opposite winding counts too
///
/// # Examples
///
/// ```
/// # use polysweep::evaluators::{InsideFunc, ParametrizedInsideFunc};
/// let f = ParametrizedInsideFunc::new(2);
/// assert!(!f.inside(1));
/// assert!(f.inside(2));
/// assert!(!f.inside(-2));
/// let g = ParametrizedInsideFunc::new(-2);
/// assert!(g.inside(-2));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParametrizedInsideFunc {
    mode: i32,
}

impl ParametrizedInsideFunc {
    #[inline]
    pub const fn new(mode: i32) -> Self {
        Self { mode }
    }

    /// Non-zero rule expressed as a mode.
    #[inline]
    pub const fn non_zero() -> Self {
        Self::new(-1)
    }

    #[inline]
    pub fn mode(&self) -> i32 {
        self.mode
    }
}

impl Default for ParametrizedInsideFunc {
    #[inline]
    fn default() -> Self {
        Self::non_zero()
    }
}

impl InsideFunc for ParametrizedInsideFunc {
    #[inline]
    fn inside(&self, wc: i32) -> bool {
        if self.mode > 0 {
            wc >= self.mode
        } else if self.mode < 0 {
            wc <= self.mode || -wc <= self.mode
        } else {
            wc % 2 != 0
        }
    }
}
