//! Horizontal layout algorithm - stacks children left-to-right.

use crate::geometry::{Region, Size};

use super::{Arrangement, Axis, Layout, LayoutChild, arrange_along};

/// Horizontal layout - stacks children left-to-right.
///
/// Widths are distributed along the row (`fr` shares the space left by
/// fixed and percent widths); heights fill the row unless declared.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalLayout;

impl Layout for HorizontalLayout {
    fn arrange(&self, children: &[LayoutChild<'_>], available: Region, viewport: Size) -> Arrangement {
        let arrangement = arrange_along(Axis::Horizontal, children, available, viewport);
        log::debug!(
            "horizontal: {} children in {} (overflow: {:?})",
            children.len(),
            available,
            arrangement.overflow
        );
        arrangement
    }
}
