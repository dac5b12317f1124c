use std::cmp::Ordering;

use num_traits::{PrimInt, Signed};

use crate::geometry::Point;

/// Divide `num` by `den` rounding to the nearest integer, halves rounded away from zero.
///
/// # Examples
///
/// ```
/// # use polysweep::core::math::div_round;
/// assert_eq!(div_round(7i64, 2), 4);
/// assert_eq!(div_round(-7i64, 2), -4);
/// assert_eq!(div_round(5i64, 3), 2);
/// assert_eq!(div_round(4i64, -3), -1);
/// ```
#[inline]
pub fn div_round<T>(num: T, den: T) -> T
where
    T: PrimInt + Signed,
{
    debug_assert!(!den.is_zero(), "division by zero");
    let (num, den) = if den < T::zero() {
        (-num, -den)
    } else {
        (num, den)
    };
    let two = T::one() + T::one();
    if num >= T::zero() {
        (two * num + den) / (two * den)
    } else {
        -((two * -num + den) / (two * den))
    }
}

/// Cross product of `a - o` and `b - o`, positive if `o -> a -> b` turns counter clockwise.
#[inline]
pub fn cross3(o: Point, a: Point, b: Point) -> i128 {
    let ax = a.x as i128 - o.x as i128;
    let ay = a.y as i128 - o.y as i128;
    let bx = b.x as i128 - o.x as i128;
    let by = b.y as i128 - o.y as i128;
    ax * by - ay * bx
}

/// Dot product of `a - o` and `b - o`.
#[inline]
pub fn dot3(o: Point, a: Point, b: Point) -> i128 {
    let ax = a.x as i128 - o.x as i128;
    let ay = a.y as i128 - o.y as i128;
    let bx = b.x as i128 - o.x as i128;
    let by = b.y as i128 - o.y as i128;
    ax * bx + ay * by
}

/// Twice the signed area of a closed point ring (shoelace formula). Counter clockwise rings are
/// positive.
pub fn ring_area2(points: &[Point]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum = 0i128;
    let mut prev = points[n - 1];
    for &p in points {
        sum += prev.x as i128 * p.y as i128 - p.x as i128 * prev.y as i128;
        prev = p;
    }
    sum
}

/// Winding number of a closed ring around a point given in doubled coordinates (`2 * x`,
/// `2 * y`), allowing edge midpoints to be tested exactly. Points on the ring boundary count
/// as outside.
pub fn winding_number2(points: &[Point], px2: i64, py2: i64) -> i32 {
    let n = points.len();
    let mut winding = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ax, ay) = (2 * a.x as i64, 2 * a.y as i64);
        let (bx, by) = (2 * b.x as i64, 2 * b.y as i64);
        let side = (bx - ax) as i128 * (py2 - ay) as i128 - (by - ay) as i128 * (px2 - ax) as i128;
        if ay <= py2 {
            if by > py2 && side > 0 {
                winding += 1;
            }
        } else if by <= py2 && side < 0 {
            winding -= 1;
        }
    }
    winding
}

/// Order the directions `a` and `b` by their counter clockwise angle from `reference`. Angles
/// are taken in `(0, 2π]`, so a direction equal to `reference` sorts last.
pub(crate) fn cmp_ccw_angle(reference: (i64, i64), a: (i64, i64), b: (i64, i64)) -> Ordering {
    let cross = |u: (i64, i64), v: (i64, i64)| u.0 as i128 * v.1 as i128 - u.1 as i128 * v.0 as i128;
    let dot = |u: (i64, i64), v: (i64, i64)| u.0 as i128 * v.0 as i128 + u.1 as i128 * v.1 as i128;
    let half = |v: (i64, i64)| {
        let c = cross(reference, v);
        if c > 0 || (c == 0 && dot(reference, v) < 0) {
            0
        } else {
            1
        }
    };
    half(a).cmp(&half(b)).then_with(|| 0.cmp(&cross(a, b)))
}
