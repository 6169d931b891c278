//! Dimension values: scalars, units, clamp pairs and box insets.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Unit {
    /// Character cells (standard terminal units).
    #[default]
    Cells,
    /// Percentage of the container's available size on the same axis.
    Percent,
    /// Proportional share of the space left after fixed reservations (fr).
    Fraction,
    /// Percentage of viewport width.
    ViewWidth,
    /// Percentage of viewport height.
    ViewHeight,
    /// Automatic sizing based on content.
    Auto,
}

/// A single dimension expression such as `10`, `50%`, `2fr` or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar {
    pub value: f64,
    pub unit: Unit,
}

impl Scalar {
    pub const AUTO: Self = Self {
        value: 0.0,
        unit: Unit::Auto,
    };
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: Unit::Cells,
    };

    pub fn cells(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Cells,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    pub fn fraction(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Fraction,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    pub fn is_fraction(&self) -> bool {
        self.unit == Unit::Fraction
    }

    /// Resolves a non-fractional scalar to whole cells.
    ///
    /// Percentages resolve against `basis`, viewport units against `viewport`
    /// (width, height). Returns `None` for `fr` and `auto`, which need the
    /// solver's context.
    pub fn resolve_cells(&self, basis: i32, viewport: (i32, i32)) -> Option<i32> {
        let of = |base: i32| ((self.value / 100.0) * base as f64).floor() as i32;
        match self.unit {
            Unit::Cells => Some(self.value.floor() as i32),
            Unit::Percent => Some(of(basis)),
            Unit::ViewWidth => Some(of(viewport.0)),
            Unit::ViewHeight => Some(of(viewport.1)),
            Unit::Fraction | Unit::Auto => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Cells => write!(f, "{}", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
            Unit::Fraction => write!(f, "{}fr", self.value),
            Unit::ViewWidth => write!(f, "{}vw", self.value),
            Unit::ViewHeight => write!(f, "{}vh", self.value),
            Unit::Auto => f.write_str("auto"),
        }
    }
}

/// Defines spacing (margin or padding) as four cell insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    pub fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn vertical_horizontal(vertical: i32, horizontal: i32) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}
