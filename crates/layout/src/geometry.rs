//! Cell geometry.

use std::fmt;

use tcss::types::Spacing;

/// The dimensions of the terminal or of a node, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }
}

/// A signed rectangular region for layout.
///
/// Coordinates are signed (i32) so that overflowing content can be placed
/// off the container's edge. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Create a new region, clamping width and height to be non-negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// A zero-area region anchored at this region's origin.
    pub fn collapsed(&self) -> Region {
        Region::new(self.x, self.y, 0, 0)
    }

    /// The region left after removing `spacing` from each edge. Negative
    /// insets count as zero.
    pub fn shrink(&self, spacing: Spacing) -> Region {
        let (top, right, bottom, left) = (
            spacing.top.max(0),
            spacing.right.max(0),
            spacing.bottom.max(0),
            spacing.left.max(0),
        );
        Region::new(
            self.x.saturating_add(left),
            self.y.saturating_add(top),
            self.width.saturating_sub(left.saturating_add(right)),
            self.height.saturating_sub(top.saturating_add(bottom)),
        )
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns true if the region has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ ({},{})", self.width, self.height, self.x, self.y)
    }
}
