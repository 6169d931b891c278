//! Shared size resolution utilities for layout algorithms.
//!
//! Turns a declared [`Dimension`] into what the solver works with:
//!
//! - Along the layout axis a child makes a [`Claim`]: a fixed reservation
//!   (cells, percent, viewport units), a fraction weight, or an auto size
//!   taken from its intrinsic content size.
//! - Across the layout axis `fr` and `auto` fill the space left by the
//!   child's own margins; everything else resolves to cells.
//!
//! Percentages resolve against the container's content size on the same
//! axis, viewport units against the terminal.

use tcss::Dimension;
use tcss::types::{Scalar, Unit};

use crate::fraction::Fraction;
use crate::geometry::Size;

/// `fr` weights are kept as integer billionths of a fraction unit.
pub const FRACTION_SCALE: i64 = 1_000_000_000;

/// How a child claims space along the layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// Reserved before any fractional distribution.
    Fixed(i32),
    /// A share of what is left, weighted (scaled by [`FRACTION_SCALE`]).
    Fraction(i64),
    /// Sized by content; 0 when nothing could be measured.
    Auto(i32),
}

impl Claim {
    pub fn classify(dimension: &Dimension, basis: i32, viewport: Size, intrinsic: Option<i32>) -> Self {
        let base = dimension.base;
        match base.unit {
            Unit::Fraction => Claim::Fraction(fraction_weight(base)),
            Unit::Auto => Claim::Auto(intrinsic.unwrap_or(0)),
            _ => Claim::Fixed(resolve(base, basis, viewport).unwrap_or(0)),
        }
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, Claim::Fraction(_))
    }
}

/// Resolved min/max clamps in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl Bounds {
    /// Combines a `minmax()` floor with `min-*`/`max-*` declarations; the
    /// tighter bound wins. `fr` and `auto` clamps are ignored.
    pub fn resolve(dimension: &Dimension, basis: i32, viewport: Size) -> Self {
        let cells = |s: Option<Scalar>| s.and_then(|s| resolve(s, basis, viewport));
        let min = match (cells(dimension.floor), cells(dimension.min)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        Self {
            min,
            max: cells(dimension.max),
        }
    }

    /// Applies the clamps. When they conflict the minimum wins.
    pub fn clamp(&self, size: i32) -> i32 {
        let size = self.max.map_or(size, |max| size.min(max));
        self.min.map_or(size, |min| size.max(min))
    }

    pub fn clamp_fraction(&self, share: Fraction) -> Fraction {
        let share = self.max.map_or(share, |max| share.min(Fraction::from(max)));
        self.min.map_or(share, |min| share.max(Fraction::from(min)))
    }

    pub fn below_max(&self, size: i32) -> bool {
        self.max.is_none_or(|max| size < max)
    }
}

/// Size across the layout axis: `fr` and `auto` fill `available`.
pub fn resolve_cross(dimension: &Dimension, available: i32, basis: i32, viewport: Size) -> i32 {
    let size = match dimension.base.unit {
        Unit::Fraction | Unit::Auto => available,
        _ => resolve(dimension.base, basis, viewport).unwrap_or(available),
    };
    Bounds::resolve(dimension, basis, viewport).clamp(size).max(0)
}

/// Resolves a scalar to cells, if it does not depend on sibling context.
pub fn resolve(scalar: Scalar, basis: i32, viewport: Size) -> Option<i32> {
    scalar.resolve_cells(basis, (viewport.width, viewport.height))
}

/// A positive weight never rounds down to zero.
fn fraction_weight(scalar: Scalar) -> i64 {
    if scalar.value.is_nan() || scalar.value <= 0.0 {
        return 0;
    }
    // Float to int casts saturate.
    ((scalar.value * FRACTION_SCALE as f64).round() as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 200,
        height: 50,
    };

    #[test]
    fn classify_units() {
        let claim = |s: Scalar| Claim::classify(&Dimension::new(s), 80, VIEWPORT, Some(7));
        assert_eq!(claim(Scalar::cells(12.0)), Claim::Fixed(12));
        assert_eq!(claim(Scalar::percent(33.0)), Claim::Fixed(26));
        assert_eq!(claim(Scalar::fraction(1.5)), Claim::Fraction(1_500_000_000));
        assert_eq!(claim(Scalar::AUTO), Claim::Auto(7));
        assert_eq!(
            Claim::classify(&Dimension::new(Scalar::AUTO), 80, VIEWPORT, None),
            Claim::Auto(0)
        );
    }

    #[test]
    fn small_weights_stay_positive() {
        let weight = |value: f64| fraction_weight(Scalar::fraction(value));
        assert_eq!(weight(0.0004), 400_000);
        assert_eq!(weight(0.0008), 800_000);
        assert_eq!(weight(1e-12), 1);
        assert_eq!(weight(0.0), 0);
        assert_eq!(weight(-2.0), 0);
        assert_eq!(weight(f64::NAN), 0);
    }

    #[test]
    fn tighter_bound_wins() {
        let dimension = Dimension {
            base: Scalar::fraction(1.0),
            floor: Some(Scalar::cells(10.0)),
            min: Some(Scalar::percent(20.0)),
            max: Some(Scalar::cells(60.0)),
        };
        let bounds = Bounds::resolve(&dimension, 100, VIEWPORT);
        assert_eq!(bounds, Bounds { min: Some(20), max: Some(60) });
        assert_eq!(bounds.clamp(5), 20);
        assert_eq!(bounds.clamp(90), 60);
        assert_eq!(bounds.clamp_fraction(Fraction::new(81, 2)), Fraction::new(81, 2));
    }

    #[test]
    fn min_wins_over_conflicting_max() {
        let bounds = Bounds {
            min: Some(30),
            max: Some(20),
        };
        assert_eq!(bounds.clamp(25), 30);
    }

    #[test]
    fn cross_axis_fill_and_fixed() {
        let fill = Dimension::new(Scalar::fraction(1.0));
        assert_eq!(resolve_cross(&fill, 40, 44, VIEWPORT), 40);
        let auto = Dimension::new(Scalar::AUTO);
        assert_eq!(resolve_cross(&auto, 40, 44, VIEWPORT), 40);
        let half = Dimension::new(Scalar::percent(50.0));
        assert_eq!(resolve_cross(&half, 40, 44, VIEWPORT), 22);
        let vh = Dimension::new(Scalar {
            value: 10.0,
            unit: Unit::ViewHeight,
        });
        assert_eq!(resolve_cross(&vh, 40, 44, VIEWPORT), 5);
    }
}
