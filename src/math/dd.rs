use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Dekker splitting constant, `2^27 + 1`.
const SPLIT: f64 = 134_217_729.0;

/// A double-double value `hi + lo`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DD {
    hi: f64,
    lo: f64,
}

impl DD {
    /// The value zero.
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };

    /// The value one.
    pub const ONE: Self = Self { hi: 1.0, lo: 0.0 };

    /// Creates a value from an already-normalised `(hi, lo)` pair.
    #[must_use]
    pub const fn new(hi: f64, lo: f64) -> Self {
        Self { hi, lo }
    }

    /// High-order component.
    #[must_use]
    pub fn hi(self) -> f64 {
        self.hi
    }

    /// Low-order component.
    #[must_use]
    pub fn lo(self) -> f64 {
        self.lo
    }

    /// Rounds to the nearest `f64`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    /// Returns whether the value is exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        self.hi == 0.0 && self.lo == 0.0
    }

    /// Returns whether the value is strictly negative.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_negative(self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }

    /// Returns whether the high part is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.hi.is_nan()
    }

    /// Sign of the value as `-1`, `0` or `1`.
    #[must_use]
    pub fn signum(self) -> i32 {
        if self.hi > 0.0 {
            return 1;
        }
        if self.hi < 0.0 {
            return -1;
        }
        if self.lo > 0.0 {
            return 1;
        }
        if self.lo < 0.0 {
            return -1;
        }
        0
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Square of the value.
    #[must_use]
    pub fn sqr(self) -> Self {
        self * self
    }

    /// `1 / self`.
    #[must_use]
    pub fn reciprocal(self) -> Self {
        Self::ONE / self
    }

    /// Computes the 2x2 determinant `x1 * y2 - y1 * x2` in double-double precision.
    #[must_use]
    pub fn determinant(x1: Self, y1: Self, x2: Self, y2: Self) -> Self {
        x1 * y2 - y1 * x2
    }

    /// Knuth two-sum of `self` and `(yhi, ylo)`, renormalised.
    fn add_parts(self, yhi: f64, ylo: f64) -> Self {
        let s = self.hi + yhi;
        let t = self.lo + ylo;
        let e = s - self.hi;
        let f = t - self.lo;
        let s_err = (yhi - e) + (self.hi - (s - e));
        let t_err = (ylo - f) + (self.lo - (t - f));
        let e = s_err + t;
        let h = s + e;
        let h_err = e + (s - h);
        let e = t_err + h_err;
        let zhi = h + e;
        let zlo = e + (h - zhi);
        Self { hi: zhi, lo: zlo }
    }

    /// Dekker product of `self` and `(yhi, ylo)`.
    fn mul_parts(self, yhi: f64, ylo: f64) -> Self {
        let (hx, tx) = split(self.hi);
        let (hy, ty) = split(yhi);
        let c_hi = self.hi * yhi;
        let c_lo = ((((hx * hy - c_hi) + hx * ty) + tx * hy) + tx * ty)
            + (self.hi * ylo + self.lo * yhi);
        let zhi = c_hi + c_lo;
        let zlo = c_lo + (c_hi - zhi);
        Self { hi: zhi, lo: zlo }
    }

    /// Long division of `self` by `(yhi, ylo)` with one correction step.
    fn div_parts(self, yhi: f64, ylo: f64) -> Self {
        let q = self.hi / yhi;
        let (hq, tq) = split(q);
        let (hy, ty) = split(yhi);
        let qy = q * yhi;
        let qy_err = (((hq * hy - qy) + hq * ty) + tq * hy) + tq * ty;
        let correction = ((((self.hi - qy) - qy_err) + self.lo) - q * ylo) / yhi;
        let zhi = q + correction;
        let zlo = (q - zhi) + correction;
        Self { hi: zhi, lo: zlo }
    }
}

/// Splits `a` into two non-overlapping halves of 26 bits each.
#[inline]
fn split(a: f64) -> (f64, f64) {
    let c = SPLIT * a;
    let abig = c - a;
    let ahi = c - abig;
    let alo = a - ahi;
    (ahi, alo)
}

impl From<f64> for DD {
    fn from(value: f64) -> Self {
        Self { hi: value, lo: 0.0 }
    }
}

impl Add for DD {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_parts(rhs.hi, rhs.lo)
    }
}

impl Add<f64> for DD {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.add_parts(rhs, 0.0)
    }
}

impl Sub for DD {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.add_parts(-rhs.hi, -rhs.lo)
    }
}

impl Sub<f64> for DD {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.add_parts(-rhs, 0.0)
    }
}

impl Mul for DD {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_parts(rhs.hi, rhs.lo)
    }
}

impl Mul<f64> for DD {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.mul_parts(rhs, 0.0)
    }
}

impl Div for DD {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.div_parts(rhs.hi, rhs.lo)
    }
}

impl Div<f64> for DD {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.div_parts(rhs, 0.0)
    }
}

impl Neg for DD {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl PartialOrd for DD {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi)? {
            Ordering::Equal => self.lo.partial_cmp(&other.lo),
            ord => Some(ord),
        }
    }
}

impl fmt::Display for DD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DD({:e}, {:e})", self.hi, self.lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_normalised(v: DD) -> bool {
        v.lo().abs() <= v.hi().abs() * f64::EPSILON
    }

    #[test]
    fn addition_keeps_bits_lost_by_f64() {
        let big = DD::from(1.0e17);
        assert!((1.0e17_f64 + 1.0 - 1.0e17).abs() < f64::EPSILON);
        let sum = (big + 1.0) - 1.0e17;
        assert!((sum.to_f64() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn product_is_exact_for_two_doubles() {
        let a = DD::from(1.0 + 2f64.powi(-30));
        let sq = a.sqr();
        assert!((sq.hi() - (1.0 + 2f64.powi(-29))).abs() < f64::EPSILON);
        assert!((sq.lo() - 2f64.powi(-60)).abs() < 1e-30);
        assert!(is_normalised(sq));
    }

    #[test]
    fn division_round_trips_to_high_precision() {
        let third = DD::ONE / 3.0;
        let back = third * 3.0 - 1.0;
        assert!(back.to_f64().abs() < 1e-30, "residual {back}");
        assert!(is_normalised(third));
    }

    #[test]
    fn reciprocal_of_seven() {
        let r = DD::from(7.0).reciprocal();
        assert!(((r * 7.0) - 1.0).to_f64().abs() < 1e-30);
    }

    #[test]
    fn signum_uses_low_part_when_high_is_zero() {
        assert_eq!(DD::new(0.0, 1e-40).signum(), 1);
        assert_eq!(DD::new(0.0, -1e-40).signum(), -1);
        assert_eq!(DD::ZERO.signum(), 0);
        assert_eq!(DD::from(-2.0).signum(), -1);
        assert!(DD::new(0.0, -1e-40).is_negative());
        assert!(DD::ZERO.is_zero());
    }

    #[test]
    fn abs_and_neg() {
        let v = DD::new(-3.0, 1e-20);
        assert!(v.abs().hi() > 0.0);
        assert!((-v).hi() > 0.0);
        assert!((v.abs() - (-v)).is_zero());
    }

    #[test]
    fn ordering_compares_low_part_on_tie() {
        assert!(DD::new(1.0, 1e-20) > DD::new(1.0, 0.0));
        assert!(DD::from(-1.0) < DD::ZERO);
    }

    #[test]
    fn determinant_detects_tiny_non_zero() {
        // (1 + e)(1 - e) - 1 * 1 = -e^2, invisible in f64 for e = 2^-30.
        let e = 2f64.powi(-30);
        let det = DD::determinant(
            DD::from(1.0 + e),
            DD::from(1.0),
            DD::from(1.0),
            DD::from(1.0 - e),
        );
        assert_eq!(det.signum(), -1);
    }

    #[test]
    fn nan_is_reported() {
        assert!(DD::from(f64::NAN).is_nan());
        assert!(!DD::ONE.is_nan());
    }
}
