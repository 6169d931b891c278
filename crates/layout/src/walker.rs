//! The Layout Tree Walker.
//!
//! [`relayout`] brings every visible node up to date in three passes:
//!
//! 1. **Style** (top-down): re-resolve the effective style of nodes marked
//!    `STYLE`, carrying the ancestor chain down for selector matching.
//! 2. **Measure** (bottom-up): recompute intrinsic sizes of dirty nodes.
//!    Leaves ask the [`Measure`] collaborator; containers add up their
//!    children along their layout axis and take the largest across it.
//! 3. **Solve** (top-down): re-arrange the children of every container
//!    that is dirty, moved, or sits below one that was re-arranged.
//!
//! Clean subtrees are not entered. Geometry is cached on the nodes until
//! the invalidation controller marks them again.

use tcss::types::{Display, Unit};
use tcss::{EffectiveStyle, NodeMeta, RuleStore, compute_style};

use crate::error::Result;
use crate::geometry::{Region, Size};
use crate::invalidation::DirtyFlags;
use crate::layouts::size_resolver::resolve;
use crate::layouts::{Axis, LayoutChild, OverflowCondition, solve};
use crate::measure::{IntrinsicSize, Measure};
use crate::tree::{NodeId, UiTree};

/// An overflow condition together with the container it happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeOverflow {
    pub node: NodeId,
    pub condition: OverflowCondition,
}

/// What a relayout did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Nodes whose style was re-resolved.
    pub restyled: usize,
    /// Nodes whose intrinsic size was recomputed.
    pub measured: usize,
    /// Containers whose children were re-arranged, in visit order.
    pub solved: Vec<NodeId>,
    pub overflows: Vec<NodeOverflow>,
}

impl LayoutReport {
    /// True if the pass found nothing to do.
    pub fn is_noop(&self) -> bool {
        self.restyled == 0 && self.measured == 0 && self.solved.is_empty()
    }
}

struct Walker<'a> {
    store: &'a RuleStore,
    measure: &'a dyn Measure,
    viewport: Size,
    report: LayoutReport,
}

/// Recomputes styles and geometry for the dirty parts of `tree`, with the
/// root filling `viewport`.
pub fn relayout(
    tree: &mut UiTree,
    store: &RuleStore,
    measure: &dyn Measure,
    viewport: Size,
) -> Result<LayoutReport> {
    let mut walker = Walker {
        store,
        measure,
        viewport,
        report: LayoutReport::default(),
    };
    let root = tree.root();

    walker.restyle(tree, root, &mut Vec::new())?;
    walker.measure_node(tree, root)?;
    walker.solve_node(tree, root, Region::from_size(viewport), false)?;

    let report = walker.report;
    log::debug!(
        "relayout {}x{}: restyled {}, measured {}, solved {}, {} overflows",
        viewport.width,
        viewport.height,
        report.restyled,
        report.measured,
        report.solved.len(),
        report.overflows.len()
    );
    Ok(report)
}

impl Walker<'_> {
    fn restyle(&mut self, tree: &mut UiTree, id: NodeId, ancestors: &mut Vec<NodeMeta>) -> Result<()> {
        let node = tree.node(id)?;
        let flags = node.dirty;
        if flags.is_empty() {
            return Ok(());
        }

        if flags.contains(DirtyFlags::STYLE) {
            let style = compute_style(&node.meta, ancestors, self.store);
            let node = tree.node_mut(id)?;
            node.style = style;
            node.dirty.remove(DirtyFlags::STYLE);
            self.report.restyled += 1;
        }

        let node = tree.node(id)?;
        let children = node.children.clone();
        ancestors.push(node.meta.clone());
        for child in children {
            self.restyle(tree, child, ancestors)?;
        }
        ancestors.pop();
        Ok(())
    }

    fn measure_node(&mut self, tree: &mut UiTree, id: NodeId) -> Result<IntrinsicSize> {
        let node = tree.node(id)?;
        if node.dirty.is_empty() {
            return Ok(node.intrinsic);
        }

        let children = node.children.clone();
        let mut child_sizes = Vec::with_capacity(children.len());
        for child in &children {
            child_sizes.push(self.measure_node(tree, *child)?);
        }

        let node = tree.node(id)?;
        let intrinsic = if children.is_empty() {
            IntrinsicSize::new(
                self.measure.measure(&node.meta, Axis::Horizontal),
                self.measure.measure(&node.meta, Axis::Vertical),
            )
        } else {
            let axis = Axis::of(node.style.layout());
            let cross = axis.cross();
            let mut along = 0i32;
            let mut across = 0i32;
            for (child, size) in children.iter().zip(&child_sizes) {
                let style = &tree.node(*child)?.style;
                if style.display() == Display::None {
                    continue;
                }
                let margin = style.margin();
                let (lead, trail) = axis.insets(margin);
                let (cross_lead, cross_trail) = cross.insets(margin);
                along = along
                    .saturating_add(self.contribution(style, axis, size))
                    .saturating_add(lead)
                    .saturating_add(trail);
                across = across.max(
                    self.contribution(style, cross, size)
                        .saturating_add(cross_lead)
                        .saturating_add(cross_trail),
                );
            }

            let padding = node.style.padding();
            let (lead, trail) = axis.insets(padding);
            let (cross_lead, cross_trail) = cross.insets(padding);
            let mut intrinsic = IntrinsicSize::default();
            intrinsic.set(axis, Some(along.saturating_add(lead).saturating_add(trail)));
            intrinsic.set(cross, Some(across.saturating_add(cross_lead).saturating_add(cross_trail)));
            intrinsic
        };

        let node = tree.node_mut(id)?;
        let changed = node.intrinsic != intrinsic;
        node.intrinsic = intrinsic;
        // An `auto` sibling may now need a different share.
        if let (true, Some(parent)) = (changed, node.parent) {
            tree.node_mut(parent)?.dirty |= DirtyFlags::CHILDREN;
        }
        self.report.measured += 1;
        Ok(intrinsic)
    }

    /// A child's share of its parent's intrinsic size: its fixed size if it
    /// has one, otherwise its own content size.
    fn contribution(&self, style: &EffectiveStyle, axis: Axis, intrinsic: &IntrinsicSize) -> i32 {
        let base = axis.dimension(style).base;
        let fixed = match base.unit {
            Unit::Cells | Unit::ViewWidth | Unit::ViewHeight => resolve(base, 0, self.viewport),
            _ => None,
        };
        fixed.or(intrinsic.along(axis)).unwrap_or(0).max(0)
    }

    fn solve_node(&mut self, tree: &mut UiTree, id: NodeId, region: Region, forced: bool) -> Result<()> {
        let node = tree.node_mut(id)?;
        let flags = node.dirty;
        let moved = node.geometry != Some(region);
        node.geometry = Some(region);
        node.dirty = DirtyFlags::empty();
        let children = node.children.clone();

        if node.style.display() == Display::None {
            for child in children {
                self.collapse(tree, child, region)?;
            }
            return Ok(());
        }

        let unplaced = children
            .iter()
            .any(|c| tree.get(*c).is_none_or(|n| n.geometry.is_none()));
        let rearrange = forced
            || moved
            || unplaced
            || flags.intersects(DirtyFlags::LAYOUT | DirtyFlags::CHILDREN);

        if !rearrange {
            if flags.contains(DirtyFlags::SUBTREE) {
                for child in children {
                    if let Some(region) = tree.node(child)?.geometry {
                        self.solve_node(tree, child, region, false)?;
                    }
                }
            }
            return Ok(());
        }

        if children.is_empty() {
            return Ok(());
        }

        let arrangement = {
            let node = tree.node(id)?;
            let content = region.shrink(node.style.padding());
            let mut laid_out = Vec::with_capacity(children.len());
            for child in &children {
                let child = tree.node(*child)?;
                laid_out.push(LayoutChild {
                    style: &child.style,
                    intrinsic: child.intrinsic,
                });
            }
            solve(node.style.layout(), &laid_out, content, self.viewport)
        };
        self.report.solved.push(id);

        if let Some(condition) = arrangement.overflow {
            log::warn!(
                "overflow in {} {:?}: {:?} needs {} cells, {} available",
                tree.node(id)?.meta.type_name,
                tree.node(id)?.meta.id,
                condition.axis,
                condition.required,
                condition.available
            );
            self.report.overflows.push(NodeOverflow { node: id, condition });
        }

        for (child, region) in children.into_iter().zip(arrangement.regions) {
            self.solve_node(tree, child, region, true)?;
        }
        Ok(())
    }

    /// Gives a `display: none` subtree empty regions at its parent's origin.
    fn collapse(&mut self, tree: &mut UiTree, id: NodeId, parent: Region) -> Result<()> {
        let node = tree.node_mut(id)?;
        node.geometry = Some(parent.collapsed());
        node.dirty = DirtyFlags::empty();
        for child in node.children.clone() {
            self.collapse(tree, child, parent)?;
        }
        Ok(())
    }
}
