//! Content measurement.
//!
//! The layout engine does not know what nodes display. Whoever does
//! (labels, tables, inputs) answers through [`Measure`]; the walker asks
//! once per node per relayout and uses the answer for `auto` sizes.

use tcss::NodeMeta;

use crate::layouts::Axis;

/// Intrinsic content size of a node, in cells, per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntrinsicSize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl IntrinsicSize {
    pub fn new(width: Option<i32>, height: Option<i32>) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> Option<i32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: Option<i32>) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }
}

/// The external content-measurement collaborator.
pub trait Measure {
    /// The node's preferred size along `axis`, or `None` if it has no
    /// content of its own.
    fn measure(&self, node: &NodeMeta, axis: Axis) -> Option<i32>;
}

/// Measures nothing: every `auto` leaf collapses to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMeasure;

impl Measure for NoMeasure {
    fn measure(&self, _node: &NodeMeta, _axis: Axis) -> Option<i32> {
        None
    }
}

impl<F> Measure for F
where
    F: Fn(&NodeMeta, Axis) -> Option<i32>,
{
    fn measure(&self, node: &NodeMeta, axis: Axis) -> Option<i32> {
        self(node, axis)
    }
}
