//! The coalescing layout engine.
//!
//! Events are queued with [`LayoutEngine::post`] and only take effect when
//! the next frame is committed with [`LayoutEngine::frame`]. Everything
//! queued since the previous frame is applied together: several resizes
//! collapse into the last one, and a single relayout covers all of them.
//! Toggles are relative: they read the node's state when they are applied,
//! so two toggles queued for the same frame cancel out.
//! A committed [`Frame`] is always a complete, consistent geometry set.

use std::collections::VecDeque;
use std::sync::Arc;

use tcss::parser::StyleRule;
use tcss::{ActiveRules, RuleStore};

use crate::error::{LayoutError, Result};
use crate::geometry::{Region, Size};
use crate::invalidation::{DirtyReason, mark_dirty};
use crate::measure::Measure;
use crate::responsive::{Breakpoints, Tier};
use crate::tree::{NodeId, UiTree};
use crate::walker::{LayoutReport, NodeOverflow, relayout};

/// External triggers consumed by the engine.
#[derive(Clone, Debug)]
pub enum Event {
    Resize { width: i32, height: i32 },
    ClassesChanged { node: NodeId, classes: Vec<String> },
    VisibilityToggled { node: NodeId, visible: bool },
    /// Flips the node's visibility as it stands when the event is applied.
    ToggleVisibility(NodeId),
    /// Adds `class` to the node, or removes it if the node already has it.
    ToggleClass { node: NodeId, class: String },
    StyleReload(Arc<RuleStore>),
}

#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub breakpoints: Breakpoints,
    /// Element id of the node whose width picks the breakpoint tier.
    pub breakpoint_host: Option<String>,
}

impl EngineConfig {
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_breakpoint_host(mut self, element_id: impl Into<String>) -> Self {
        self.breakpoint_host = Some(element_id.into());
        self
    }
}

/// One committed geometry set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub generation: u64,
    pub viewport: Size,
    pub tier: Option<Tier>,
    /// Every visible node with its rectangle, in pre-order.
    pub geometry: Vec<(NodeId, Region)>,
    /// Opaque style tokens (colors, alignment, borders) for the painter.
    pub tokens: Vec<(NodeId, Vec<(String, String)>)>,
    pub overflows: Vec<NodeOverflow>,
}

impl Frame {
    pub fn region(&self, node: NodeId) -> Option<Region> {
        self.geometry
            .iter()
            .find_map(|(id, region)| (*id == node).then_some(*region))
    }

    pub fn tokens_of(&self, node: NodeId) -> &[(String, String)] {
        self.tokens
            .iter()
            .find(|(id, _)| *id == node)
            .map_or(&[], |(_, tokens)| tokens.as_slice())
    }
}

pub struct LayoutEngine<M: Measure> {
    tree: UiTree,
    rules: ActiveRules,
    measure: M,
    config: EngineConfig,
    pending: VecDeque<Event>,
    /// Last resize seen and not yet committed.
    resize: Option<Size>,
    viewport: Size,
    tier: Option<Tier>,
    generation: u64,
}

impl<M: Measure> LayoutEngine<M> {
    pub fn new(tree: UiTree, rules: RuleStore, measure: M, config: EngineConfig) -> Self {
        Self {
            tree,
            rules: ActiveRules::new(rules),
            measure,
            config,
            pending: VecDeque::new(),
            resize: None,
            viewport: Size::default(),
            tier: None,
            generation: 0,
        }
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Mutable access for mounting and unmounting nodes. Structural edits
    /// mark the tree dirty themselves; they show up in the next frame.
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    pub fn rules(&self) -> Arc<RuleStore> {
        self.rules.snapshot()
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn post(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Loads `rules` into a new store and queues it to replace the active
    /// one. A rule set that fails to load is rejected here and nothing is
    /// queued.
    pub fn reload(&mut self, rules: impl IntoIterator<Item = StyleRule>) -> Result<()> {
        let store = RuleStore::load(rules).inspect_err(|e| log::warn!("reload rejected: {e}"))?;
        self.post(Event::StyleReload(Arc::new(store)));
        Ok(())
    }

    /// Parses TCSS source and queues it like [`reload`](Self::reload).
    pub fn reload_source(&mut self, source: &str) -> Result<()> {
        let store = RuleStore::from_source(source).inspect_err(|e| log::warn!("reload rejected: {e}"))?;
        self.post(Event::StyleReload(Arc::new(store)));
        Ok(())
    }

    /// Queues showing or hiding `node`, relative to its visibility when the
    /// next frame applies it.
    pub fn toggle_visible(&mut self, node: NodeId) -> Result<()> {
        self.tree.node(node)?;
        self.post(Event::ToggleVisibility(node));
        Ok(())
    }

    /// Queues adding or removing one class on `node`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.tree.node(node)?;
        self.post(Event::ToggleClass {
            node,
            class: class.to_string(),
        });
        Ok(())
    }

    /// Applies every queued event, relayouts once, and commits the result.
    ///
    /// Events for nodes removed since they were posted are dropped.
    pub fn frame(&mut self) -> Result<Frame> {
        let events = self.pending.len();
        while let Some(event) = self.pending.pop_front() {
            match self.apply(event) {
                Err(LayoutError::UnknownNode(node)) => {
                    log::warn!("dropping event for removed node {node:?}");
                }
                other => other?,
            }
        }
        if let Some(size) = self.resize.take().filter(|size| *size != self.viewport) {
            self.viewport = size;
            let root = self.tree.root();
            mark_dirty(&mut self.tree, root, DirtyReason::ResizeEvent)?;
        }

        let store = self.rules.snapshot();
        let mut report = relayout(&mut self.tree, &store, &self.measure, self.viewport)?;
        if self.apply_tier()? {
            let second = relayout(&mut self.tree, &store, &self.measure, self.viewport)?;
            report = merge(report, second);
        }

        self.generation += 1;
        log::debug!(
            "frame {}: {} events, {} containers solved",
            self.generation,
            events,
            report.solved.len()
        );
        Ok(self.commit(report))
    }

    fn apply(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Resize { width, height } => self.resize = Some(Size::new(width, height)),
            Event::ClassesChanged { node, classes } => self.apply_classes(node, classes)?,
            Event::VisibilityToggled { node, visible } => self.apply_visibility(node, visible)?,
            Event::ToggleVisibility(node) => {
                let visible = self.tree.node(node)?.visible;
                self.apply_visibility(node, !visible)?;
            }
            Event::ToggleClass { node, class } => {
                let meta = &self.tree.node(node)?.meta;
                let present = meta.has_class(&class);
                let mut classes: Vec<String> =
                    meta.classes.iter().filter(|c| c.as_str() != class).cloned().collect();
                if !present {
                    classes.push(class);
                }
                self.apply_classes(node, classes)?;
            }
            Event::StyleReload(store) => {
                let superseded = self.rules.swap(store);
                log::debug!(
                    "style reload: {} rules replace {}",
                    self.rules.snapshot().len(),
                    superseded.len()
                );
                let root = self.tree.root();
                mark_dirty(&mut self.tree, root, DirtyReason::StyleChanged)?;
            }
        }
        Ok(())
    }

    fn apply_visibility(&mut self, node: NodeId, visible: bool) -> Result<()> {
        if self.tree.set_visible(node, visible)? {
            mark_dirty(&mut self.tree, node, DirtyReason::VisibilityToggled)?;
        }
        Ok(())
    }

    fn apply_classes(&mut self, node: NodeId, mut classes: Vec<String>) -> Result<()> {
        // The host keeps its tier class through application class edits.
        if let Some(tier) = self.tier.filter(|_| Some(node) == self.host()) {
            classes.retain(|c| !Tier::is_tier_class(c));
            classes.push(tier.class().to_string());
        }
        if self.tree.set_classes(node, &classes)? {
            mark_dirty(&mut self.tree, node, DirtyReason::ClassesChanged)?;
        }
        Ok(())
    }

    fn host(&self) -> Option<NodeId> {
        self.config
            .breakpoint_host
            .as_deref()
            .and_then(|id| self.tree.find(id))
    }

    /// Puts the tier class matching the host's solved width on the host.
    /// Returns whether the class changed.
    fn apply_tier(&mut self) -> Result<bool> {
        let Some(host) = self.host() else {
            return Ok(false);
        };
        let Some(region) = self.tree.geometry(host) else {
            return Ok(false);
        };
        let tier = self.config.breakpoints.tier_for(region.width);
        let meta = &self.tree.node(host)?.meta;
        if self.tier == Some(tier) && meta.has_class(tier.class()) {
            return Ok(false);
        }

        let mut classes: Vec<String> = meta
            .classes
            .iter()
            .filter(|c| !Tier::is_tier_class(c))
            .cloned()
            .collect();
        classes.push(tier.class().to_string());
        log::debug!("breakpoint: host width {} -> {}", region.width, tier);

        self.tier = Some(tier);
        if self.tree.set_classes(host, &classes)? {
            mark_dirty(&mut self.tree, host, DirtyReason::ClassesChanged)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn commit(&self, report: LayoutReport) -> Frame {
        let mut frame = Frame {
            generation: self.generation,
            viewport: self.viewport,
            tier: self.tier,
            overflows: report.overflows,
            ..Frame::default()
        };
        for id in self.tree.visible() {
            let Some(region) = self.tree.geometry(id) else {
                continue;
            };
            frame.geometry.push((id, region));
            if let Some(style) = self.tree.style(id) {
                let tokens: Vec<(String, String)> = style
                    .tokens()
                    .map(|(property, value)| (property.to_string(), value.to_string()))
                    .collect();
                if !tokens.is_empty() {
                    frame.tokens.push((id, tokens));
                }
            }
        }
        frame
    }
}

/// Combines the reports of a frame's two passes. Overflows found by the
/// first pass in containers the second pass re-solved are superseded.
fn merge(first: LayoutReport, second: LayoutReport) -> LayoutReport {
    let mut overflows: Vec<NodeOverflow> = first
        .overflows
        .into_iter()
        .filter(|o| !second.solved.contains(&o.node))
        .collect();
    overflows.extend(second.overflows);
    let mut solved = first.solved;
    solved.extend(second.solved);
    LayoutReport {
        restyled: first.restyled + second.restyled,
        measured: first.measured + second.measured,
        solved,
        overflows,
    }
}
