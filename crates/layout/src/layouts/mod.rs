//! Layout algorithms for arranging child nodes within containers.
//!
//! This module is the Box Layout Solver. A container's `layout` property
//! picks the algorithm; both stack children along one axis and share the
//! same distribution rules (see [`distribute`]).
//!
//! ## Architecture
//!
//! - **Layout trait**: Defines the `arrange()` method that layouts must implement
//! - **VerticalLayout**: Stacks children top-to-bottom
//! - **HorizontalLayout**: Stacks children left-to-right
//!
//! ## Usage
//!
//! The tree walker calls [`solve`], which dispatches on the container's
//! [`LayoutKind`] and returns one region per child, in child order.

pub mod distribute;
mod horizontal;
pub mod size_resolver;
mod vertical;

pub use horizontal::HorizontalLayout;
pub use vertical::VerticalLayout;

use tcss::types::{Display, Layout as LayoutKind, Spacing};
use tcss::{Dimension, EffectiveStyle};

use crate::geometry::{Region, Size};
use crate::measure::IntrinsicSize;
use distribute::{Track, distribute};
use size_resolver::{Bounds, Claim, resolve_cross};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The axis a container of this kind stacks its children along.
    pub fn of(layout: LayoutKind) -> Axis {
        match layout {
            LayoutKind::Horizontal => Axis::Horizontal,
            LayoutKind::Vertical => Axis::Vertical,
        }
    }

    pub fn extent(self, region: &Region) -> i32 {
        match self {
            Axis::Horizontal => region.width,
            Axis::Vertical => region.height,
        }
    }

    pub fn origin(self, region: &Region) -> i32 {
        match self {
            Axis::Horizontal => region.x,
            Axis::Vertical => region.y,
        }
    }

    pub fn of_size(self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// The declared size of a node along this axis.
    pub fn dimension(self, style: &EffectiveStyle) -> Dimension {
        match self {
            Axis::Horizontal => style.width(),
            Axis::Vertical => style.height(),
        }
    }

    /// Leading and trailing insets along this axis, never negative.
    pub fn insets(self, spacing: Spacing) -> (i32, i32) {
        let (lead, trail) = match self {
            Axis::Horizontal => (spacing.left, spacing.right),
            Axis::Vertical => (spacing.top, spacing.bottom),
        };
        (lead.max(0), trail.max(0))
    }

    /// Builds a region from positions and sizes on this axis and across it.
    pub fn region(self, main_pos: i32, cross_pos: i32, main: i32, cross: i32) -> Region {
        match self {
            Axis::Horizontal => Region::new(main_pos, cross_pos, main, cross),
            Axis::Vertical => Region::new(cross_pos, main_pos, cross, main),
        }
    }
}

/// A child as seen by the solver.
#[derive(Clone, Copy, Debug)]
pub struct LayoutChild<'a> {
    pub style: &'a EffectiveStyle,
    pub intrinsic: IntrinsicSize,
}

/// Fixed and percent reservations that do not fit their container.
///
/// Not an error: the caller decides whether to clip or scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverflowCondition {
    pub axis: Axis,
    pub available: i32,
    pub required: i32,
}

/// Result of layout arrangement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arrangement {
    /// One region per child, in child order. `display: none` children get
    /// an empty region.
    pub regions: Vec<Region>,
    pub overflow: Option<OverflowCondition>,
}

/// Layout algorithm trait.
///
/// Layouts compute the regions where each child should be placed, based on
/// the children's styles and the container's content region.
pub trait Layout {
    /// Arrange children within the available region.
    ///
    /// # Arguments
    /// * `children` - The container's visible children, in order
    /// * `available` - The container's content region (inside its padding)
    /// * `viewport` - The terminal size, for `vw`/`vh` units
    fn arrange(&self, children: &[LayoutChild<'_>], available: Region, viewport: Size) -> Arrangement;
}

/// Dispatch to the appropriate layout algorithm based on CSS.
pub fn solve(
    layout: LayoutKind,
    children: &[LayoutChild<'_>],
    available: Region,
    viewport: Size,
) -> Arrangement {
    match layout {
        LayoutKind::Vertical => VerticalLayout.arrange(children, available, viewport),
        LayoutKind::Horizontal => HorizontalLayout.arrange(children, available, viewport),
    }
}

/// Stacks `children` along `axis`, shared by both layouts.
pub(crate) fn arrange_along(
    axis: Axis,
    children: &[LayoutChild<'_>],
    available: Region,
    viewport: Size,
) -> Arrangement {
    let cross_axis = axis.cross();
    let main_extent = axis.extent(&available);
    let cross_extent = cross_axis.extent(&available);

    let shown = |child: &LayoutChild<'_>| child.style.display() != Display::None;

    let mut margins = 0i32;
    let tracks: Vec<Track> = children
        .iter()
        .filter(|c| shown(c))
        .map(|child| {
            let (lead, trail) = axis.insets(child.style.margin());
            margins = margins.saturating_add(lead).saturating_add(trail);
            let dimension = axis.dimension(child.style);
            Track {
                claim: Claim::classify(
                    &dimension,
                    main_extent,
                    viewport,
                    child.intrinsic.along(axis),
                ),
                bounds: Bounds::resolve(&dimension, main_extent, viewport),
            }
        })
        .collect();

    let distribution = distribute(&tracks, main_extent, margins);

    let mut regions = Vec::with_capacity(children.len());
    let mut sizes = distribution.sizes.iter();
    let mut cursor = axis.origin(&available);
    let cross_origin = cross_axis.origin(&available);

    for child in children {
        if !shown(child) {
            regions.push(axis.region(cursor, cross_origin, 0, 0));
            continue;
        }
        let margin = child.style.margin();
        let (lead, trail) = axis.insets(margin);
        let (cross_lead, cross_trail) = cross_axis.insets(margin);

        cursor = cursor.saturating_add(lead);
        let main = sizes.next().copied().unwrap_or(0);
        let cross = resolve_cross(
            &cross_axis.dimension(child.style),
            cross_extent.saturating_sub(cross_lead).saturating_sub(cross_trail).max(0),
            cross_extent,
            viewport,
        );
        regions.push(axis.region(cursor, cross_origin.saturating_add(cross_lead), main, cross));
        cursor = cursor.saturating_add(main).saturating_add(trail);
    }

    let overflow = (distribution.required > main_extent).then_some(OverflowCondition {
        axis,
        available: main_extent,
        required: distribution.required,
    });
    Arrangement { regions, overflow }
}
