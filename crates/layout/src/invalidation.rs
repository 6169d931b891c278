//! The Invalidation Controller.
//!
//! Events mark nodes dirty; the tree walker clears the flags as it
//! recomputes. Class and style changes invalidate the whole subtree: a
//! descendant selector may depend on any ancestor's classes, and tracking
//! per-rule dependencies is not worth it at dashboard scale.

use bitflags::bitflags;

use crate::error::Result;
use crate::tree::{NodeId, UiTree};

bitflags! {
    /// What is stale about a node.
    ///
    /// # Example
    ///
    /// ```
    /// use tcss_layout::DirtyFlags;
    ///
    /// let mut flags = DirtyFlags::empty();
    /// flags |= DirtyFlags::LAYOUT;
    /// assert!(flags.contains(DirtyFlags::LAYOUT));
    /// assert!(!flags.contains(DirtyFlags::STYLE));
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// The effective style must be re-resolved.
        const STYLE = 1 << 0;
        /// The node's own geometry must be recomputed.
        const LAYOUT = 1 << 1;
        /// The node's children must be re-arranged.
        const CHILDREN = 1 << 2;
        /// Something below this node is dirty.
        const SUBTREE = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirtyReason {
    StyleChanged,
    ClassesChanged,
    ResizeEvent,
    VisibilityToggled,
}

/// Marks `node` dirty for `reason` and propagates the consequences.
///
/// - Style and class changes: the node and every mounted descendant need
///   a new style and new geometry.
/// - Resize: the node and every mounted descendant need new geometry.
/// - Visibility: the node's subtree needs new geometry when it reappears.
///
/// In every case the parent must re-arrange its children and each further
/// ancestor learns that something below it is dirty.
pub fn mark_dirty(tree: &mut UiTree, node: NodeId, reason: DirtyReason) -> Result<()> {
    let flags = match reason {
        DirtyReason::StyleChanged | DirtyReason::ClassesChanged => {
            DirtyFlags::STYLE | DirtyFlags::LAYOUT
        }
        DirtyReason::ResizeEvent | DirtyReason::VisibilityToggled => DirtyFlags::LAYOUT,
    };

    let subtree = tree.subtree(node)?;
    for id in &subtree {
        tree.node_mut(*id)?.dirty |= flags;
    }
    log::debug!(
        "invalidate {:?} ({}): {} nodes {:?}",
        node,
        tree.node(node)?.meta.type_name,
        subtree.len(),
        reason
    );

    match tree.node(node)?.parent {
        Some(parent) => mark_children_changed(tree, parent),
        None => Ok(()),
    }
}

/// Records that `parent` must re-arrange its children.
pub(crate) fn mark_children_changed(tree: &mut UiTree, parent: NodeId) -> Result<()> {
    tree.node_mut(parent)?.dirty |= DirtyFlags::CHILDREN;
    for id in tree.ancestors(parent)? {
        tree.node_mut(id)?.dirty |= DirtyFlags::SUBTREE;
    }
    Ok(())
}
