//! Rational number type for precise layout calculations.
//!
//! Avoids floating-point accumulation errors in fractional distribution.
//! Shares are kept exact until the final flooring step.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

/// A rational number (fraction) for precise arithmetic.
///
/// Layout calculations involve divisions that don't produce integers.
/// Floating-point accumulates errors over many children, but Fraction
/// maintains exact precision by keeping numerator and denominator separate.
///
/// # Example
///
/// ```
/// use tcss_layout::Fraction;
///
/// // 97 cells shared by three equal weights
/// let share = Fraction::from(97).mul_ratio(1, 3);
/// assert_eq!(share.floor(), 32);
/// assert_eq!(share.fract(), Fraction::new(1, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Zero as a fraction (0/1).
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };

    /// Create a new fraction, automatically reduced to lowest terms.
    ///
    /// Handles negative denominators by moving sign to numerator.
    /// Returns ZERO if denominator is zero.
    pub fn new(num: i64, den: i64) -> Self {
        Self::reduced(i128::from(num), i128::from(den))
    }

    /// Reduces a wide intermediate. Terms that still do not fit in `i64`
    /// are halved together until they do.
    fn reduced(num: i128, den: i128) -> Self {
        if den == 0 {
            return Self::ZERO;
        }
        let g = gcd(num.abs(), den.abs());
        let sign = if den < 0 { -1 } else { 1 };
        let mut num = sign * num / g;
        let mut den = (den / g).abs();
        while i64::try_from(num).is_err() || i64::try_from(den).is_err() {
            num /= 2;
            den = (den / 2).max(1);
        }
        Self {
            num: i64::try_from(num).unwrap_or(i64::MAX),
            den: i64::try_from(den).unwrap_or(1),
        }
    }

    /// Integer part (floor division).
    pub fn floor(&self) -> i64 {
        self.num.div_euclid(self.den)
    }

    /// Fractional part (always non-negative, less than 1).
    pub fn fract(&self) -> Fraction {
        Fraction::new(self.num.rem_euclid(self.den), self.den)
    }

    /// `self * num / den`, without building an intermediate fraction.
    pub fn mul_ratio(self, num: i64, den: i64) -> Fraction {
        Self::reduced(
            i128::from(self.num) * i128::from(num),
            i128::from(self.den) * i128::from(den),
        )
    }

    pub fn max(self, other: Fraction) -> Fraction {
        if other > self { other } else { self }
    }

    pub fn min(self, other: Fraction) -> Fraction {
        if other < self { other } else { self }
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    fn wide(self) -> (i128, i128) {
        (i128::from(self.num), i128::from(self.den))
    }
}

impl From<i32> for Fraction {
    fn from(n: i32) -> Self {
        Fraction::new(i64::from(n), 1)
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::new(n, 1)
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        Fraction::reduced(a * d + c * b, b * d)
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        Fraction::reduced(a * d - c * b, b * d)
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let ((a, b), (c, d)) = (self.wide(), rhs.wide());
        Fraction::reduced(a * c, b * d)
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are always positive.
        let ((a, b), (c, d)) = (self.wide(), other.wide());
        (a * d).cmp(&(c * b))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::ZERO, Add::add)
    }
}

/// Greatest common divisor using Euclidean algorithm.
fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.max(1)
}
