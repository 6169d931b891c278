//! The UI node tree.
//!
//! Nodes live in a [`SlotMap`] arena owned by the tree. Parents own their
//! children through the arena; the parent link is a plain key used for
//! lookups (ancestor matching, dirty propagation) and never for ownership,
//! so dropping the tree frees everything.
//!
//! Every node keeps two child lists: `mounted` holds all children in
//! order, `children` only the visible ones. Layout walks `children`;
//! showing a hidden node puts it back at its mounted position.

use slotmap::{SlotMap, new_key_type};
use tcss::{EffectiveStyle, NodeMeta};

use crate::error::{LayoutError, Result};
use crate::geometry::Region;
use crate::invalidation::{self, DirtyFlags, DirtyReason};
use crate::measure::IntrinsicSize;

new_key_type! {
    /// Stable handle to a node in a [`UiTree`].
    pub struct NodeId;
}

#[derive(Debug)]
pub struct UiNode {
    pub(crate) meta: NodeMeta,
    pub(crate) parent: Option<NodeId>,
    pub(crate) mounted: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visible: bool,
    pub(crate) style: EffectiveStyle,
    pub(crate) intrinsic: IntrinsicSize,
    pub(crate) geometry: Option<Region>,
    pub(crate) dirty: DirtyFlags,
}

impl UiNode {
    fn new(meta: NodeMeta) -> Self {
        Self {
            meta,
            parent: None,
            mounted: Vec::new(),
            children: Vec::new(),
            visible: true,
            style: EffectiveStyle::default(),
            intrinsic: IntrinsicSize::default(),
            geometry: None,
            dirty: DirtyFlags::STYLE | DirtyFlags::LAYOUT,
        }
    }

    pub fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Visible children, in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// All children, visible or not, in order.
    pub fn mounted(&self) -> &[NodeId] {
        &self.mounted
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn intrinsic(&self) -> IntrinsicSize {
        self.intrinsic
    }
}

#[derive(Debug)]
pub struct UiTree {
    nodes: SlotMap<NodeId, UiNode>,
    root: NodeId,
}

impl UiTree {
    pub fn new(root: NodeMeta) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(UiNode::new(root));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&UiNode> {
        self.nodes.get(id).ok_or(LayoutError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut UiNode> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode(id))
    }

    /// Adds a detached node to the arena.
    pub fn insert(&mut self, meta: NodeMeta) -> NodeId {
        self.nodes.insert(UiNode::new(meta))
    }

    /// Inserts a node and mounts it as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, meta: NodeMeta) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.insert(meta);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Mounts `child` as the last child of `parent`, moving it if it is
    /// mounted elsewhere.
    ///
    /// Fails with [`LayoutError::CyclicDependency`] if `child` is `parent`
    /// or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        if parent == child || self.ancestors(parent)?.contains(&child) {
            return Err(LayoutError::CyclicDependency { parent, child });
        }

        if let Some(old_parent) = self.node(child)?.parent {
            self.detach(old_parent, child)?;
        }

        let visible = self.node(child)?.visible;
        let node = self.node_mut(parent)?;
        node.mounted.push(child);
        if visible {
            node.children.push(child);
        }
        self.node_mut(child)?.parent = Some(parent);

        // The child's ancestor chain changed, so its styles may have too.
        invalidation::mark_dirty(self, child, DirtyReason::StyleChanged)
    }

    /// Unmounts `node` and drops it with its whole subtree.
    ///
    /// The root cannot be removed; returns `false` for it.
    pub fn remove(&mut self, node: NodeId) -> Result<bool> {
        if node == self.root {
            return Ok(false);
        }
        if let Some(parent) = self.node(node)?.parent {
            self.detach(parent, node)?;
        }
        for id in self.subtree(node)? {
            self.nodes.remove(id);
        }
        Ok(true)
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self.node_mut(parent)?;
        node.mounted.retain(|id| *id != child);
        node.children.retain(|id| *id != child);
        self.node_mut(child)?.parent = None;
        invalidation::mark_children_changed(self, parent)
    }

    /// Shows or hides a node. Hidden nodes leave their parent's visible
    /// child list and lose their geometry. Returns whether anything
    /// changed.
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<bool> {
        if self.node(node)?.visible == visible {
            return Ok(false);
        }
        self.node_mut(node)?.visible = visible;

        if let Some(parent) = self.node(node)?.parent {
            let shown: Vec<NodeId> = self
                .node(parent)?
                .mounted
                .iter()
                .copied()
                .filter(|id| self.nodes.get(*id).is_some_and(|n| n.visible))
                .collect();
            self.node_mut(parent)?.children = shown;
        }
        if !visible {
            for id in self.subtree(node)? {
                self.node_mut(id)?.geometry = None;
            }
        }
        Ok(true)
    }

    /// Replaces a node's class set. Returns whether it changed.
    pub fn set_classes(&mut self, node: NodeId, classes: &[String]) -> Result<bool> {
        let meta = &mut self.node_mut(node)?.meta;
        let mut next = meta.clone();
        next.classes.clear();
        for class in classes {
            next.add_class(class);
        }
        if next.classes == meta.classes {
            return Ok(false);
        }
        *meta = next;
        Ok(true)
    }

    /// Finds a mounted node by its element id.
    pub fn find(&self, element_id: &str) -> Option<NodeId> {
        self.subtree(self.root)
            .ok()?
            .into_iter()
            .find(|id| {
                self.nodes
                    .get(*id)
                    .and_then(|n| n.meta.id.as_deref())
                    == Some(element_id)
            })
    }

    /// Ancestors of `node`, ordered from the root down to its parent.
    pub fn ancestors(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let mut chain = Vec::new();
        let mut current = self.node(node)?.parent;
        while let Some(id) = current {
            chain.push(id);
            current = self.node(id)?.parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Ancestor identities, root first, as the selector matcher wants them.
    pub fn ancestor_metas(&self, node: NodeId) -> Result<Vec<NodeMeta>> {
        self.ancestors(node)?
            .into_iter()
            .map(|id| Ok(self.node(id)?.meta.clone()))
            .collect()
    }

    /// `node` and all its mounted descendants, in pre-order.
    pub fn subtree(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.node(node)?;
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id)?.mounted.iter().rev());
        }
        Ok(out)
    }

    /// Visible nodes reachable from the root, in pre-order.
    pub fn visible(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// True if `node` or anything above it is waiting for a relayout.
    pub fn is_stale(&self, node: NodeId) -> bool {
        let own = DirtyFlags::STYLE | DirtyFlags::LAYOUT;
        let inherited = own | DirtyFlags::CHILDREN;
        let Some(n) = self.nodes.get(node) else {
            return true;
        };
        if n.dirty.intersects(own) {
            return true;
        }
        let mut current = n.parent;
        while let Some(id) = current {
            let Some(ancestor) = self.nodes.get(id) else {
                return true;
            };
            if ancestor.dirty.intersects(inherited) {
                return true;
            }
            current = ancestor.parent;
        }
        false
    }

    /// The node's solved rectangle, or `None` if it is stale, hidden or
    /// was never laid out.
    pub fn geometry(&self, node: NodeId) -> Option<Region> {
        if self.is_stale(node) {
            return None;
        }
        self.nodes.get(node)?.geometry
    }

    /// The node's resolved style, or `None` while it needs recomputing.
    pub fn style(&self, node: NodeId) -> Option<&EffectiveStyle> {
        let n = self.nodes.get(node)?;
        (!n.dirty.contains(DirtyFlags::STYLE)).then_some(&n.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (UiTree, NodeId, NodeId, NodeId) {
        let mut tree = UiTree::new(NodeMeta::new("Screen"));
        let root = tree.root();
        let app = tree
            .add_child(root, NodeMeta::new("Vertical").with_id("app_vertical"))
            .unwrap();
        let table = tree
            .add_child(app, NodeMeta::new("DataTable").with_id("table_connections"))
            .unwrap();
        (tree, root, app, table)
    }

    #[test]
    fn ancestors_are_root_first() {
        let (tree, root, app, table) = sample();
        assert_eq!(tree.ancestors(table).unwrap(), vec![root, app]);
        let metas = tree.ancestor_metas(table).unwrap();
        assert_eq!(metas[1].id.as_deref(), Some("app_vertical"));
    }

    #[test]
    fn appending_an_ancestor_is_a_cycle() {
        let (mut tree, root, app, table) = sample();
        assert!(matches!(
            tree.append_child(table, app),
            Err(LayoutError::CyclicDependency { .. })
        ));
        assert!(matches!(
            tree.append_child(table, table),
            Err(LayoutError::CyclicDependency { .. })
        ));
        assert!(matches!(
            tree.append_child(app, root),
            Err(LayoutError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn reparenting_moves_the_node() {
        let (mut tree, root, app, table) = sample();
        tree.append_child(root, table).unwrap();
        assert!(tree.get(app).unwrap().mounted().is_empty());
        assert_eq!(tree.get(root).unwrap().children(), &[app, table]);
        assert_eq!(tree.get(table).unwrap().parent(), Some(root));
    }

    #[test]
    fn hidden_nodes_keep_their_slot() {
        let mut tree = UiTree::new(NodeMeta::new("Screen"));
        let root = tree.root();
        let a = tree.add_child(root, NodeMeta::new("A")).unwrap();
        let b = tree.add_child(root, NodeMeta::new("B")).unwrap();
        let c = tree.add_child(root, NodeMeta::new("C")).unwrap();

        assert!(tree.set_visible(b, false).unwrap());
        assert!(!tree.set_visible(b, false).unwrap());
        assert_eq!(tree.get(root).unwrap().children(), &[a, c]);
        assert_eq!(tree.visible(), vec![root, a, c]);

        tree.set_visible(b, true).unwrap();
        assert_eq!(tree.get(root).unwrap().children(), &[a, b, c]);
    }

    #[test]
    fn find_and_remove() {
        let (mut tree, _, app, table) = sample();
        assert_eq!(tree.find("table_connections"), Some(table));
        assert!(tree.remove(app).unwrap());
        assert_eq!(tree.find("table_connections"), None);
        assert_eq!(tree.len(), 1);
        assert!(!tree.remove(tree.root()).unwrap());
    }

    #[test]
    fn new_nodes_have_no_geometry() {
        let (tree, _, _, table) = sample();
        assert!(tree.is_stale(table));
        assert_eq!(tree.geometry(table), None);
        assert!(tree.style(table).is_none());
    }

    #[test]
    fn set_classes_reports_changes() {
        let (mut tree, _, app, _) = sample();
        let classes = vec!["-lg".to_string()];
        assert!(tree.set_classes(app, &classes).unwrap());
        assert!(!tree.set_classes(app, &classes).unwrap());
        assert!(tree.get(app).unwrap().meta().has_class("-lg"));
    }
}
