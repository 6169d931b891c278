//! CSS cascade and style computation.
//!
//! - [`compute_style`]: Main entry point for computing a node's effective style
//! - [`resolve`]: Combines an already-matched rule set
//! - [`EffectiveStyle`]: The per-property winners, with their origin rule
//!
//! ## Cascade Algorithm
//!
//! 1. Find all rules whose selectors match the node
//! 2. Stable-sort by specificity (ids > classes > types), then source order
//! 3. Apply declarations in that order, so the last writer of a property wins
//!
//! The outcome depends only on the rule store, the node and its ancestor
//! chain; the order in which matches are discovered does not matter.

use std::collections::BTreeMap;

use crate::matcher::{NodeMeta, matches};
use crate::parser::{Property, Specificity, StyleRule, Value};
use crate::store::RuleStore;
use crate::types::{Display, Layout, Overflow, Scalar, Spacing};

/// Identifies the rule a winning declaration came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleOrigin {
    pub order: usize,
    pub specificity: Specificity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleEntry {
    pub value: Value,
    pub origin: RuleOrigin,
}

/// A base size and its clamps on one axis, as declared.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimension {
    pub base: Scalar,
    /// Lower bound carried by a `minmax()` base.
    pub floor: Option<Scalar>,
    pub min: Option<Scalar>,
    pub max: Option<Scalar>,
}

impl Dimension {
    pub fn new(base: Scalar) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }
}

/// The resolved style of one node: one winning value per declared property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectiveStyle {
    entries: BTreeMap<Property, StyleEntry>,
}

impl EffectiveStyle {
    pub fn get(&self, property: &Property) -> Option<&StyleEntry> {
        self.entries.get(property)
    }

    pub fn value(&self, property: &Property) -> Option<&Value> {
        self.get(property).map(|e| &e.value)
    }

    /// The rule that supplied `property`, for diagnostics.
    pub fn origin(&self, property: &Property) -> Option<RuleOrigin> {
        self.get(property).map(|e| e.origin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Property, &StyleEntry)> {
        self.entries.iter()
    }

    /// Declared width; `auto` when no rule sets it.
    pub fn width(&self) -> Dimension {
        self.dimension(&Property::Width, &Property::MinWidth, &Property::MaxWidth)
    }

    /// Declared height; `auto` when no rule sets it.
    pub fn height(&self) -> Dimension {
        self.dimension(&Property::Height, &Property::MinHeight, &Property::MaxHeight)
    }

    pub fn margin(&self) -> Spacing {
        match self.value(&Property::Margin) {
            Some(Value::Spacing(s)) => *s,
            _ => Spacing::default(),
        }
    }

    pub fn padding(&self) -> Spacing {
        match self.value(&Property::Padding) {
            Some(Value::Spacing(s)) => *s,
            _ => Spacing::default(),
        }
    }

    pub fn display(&self) -> Display {
        match self.value(&Property::Display) {
            Some(Value::Display(d)) => *d,
            _ => Display::default(),
        }
    }

    pub fn layout(&self) -> Layout {
        match self.value(&Property::Layout) {
            Some(Value::Layout(l)) => *l,
            _ => Layout::default(),
        }
    }

    pub fn overflow_x(&self) -> Overflow {
        match self.value(&Property::OverflowX) {
            Some(Value::Overflow(o)) => *o,
            _ => Overflow::default(),
        }
    }

    pub fn overflow_y(&self) -> Overflow {
        match self.value(&Property::OverflowY) {
            Some(Value::Overflow(o)) => *o,
            _ => Overflow::default(),
        }
    }

    /// Non-layout declarations (colors, alignment, borders...), passed
    /// through uninterpreted for the renderer.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(property, entry)| match &entry.value {
            Value::Token(token) if !property.is_layout() => Some((property.name(), token.as_str())),
            _ => None,
        })
    }

    fn dimension(&self, base: &Property, min: &Property, max: &Property) -> Dimension {
        let mut dimension = match self.value(base) {
            Some(Value::Scalar(s)) => Dimension::new(*s),
            Some(Value::Range { min, max }) => Dimension {
                base: *max,
                floor: Some(*min),
                ..Default::default()
            },
            _ => Dimension::new(Scalar::AUTO),
        };
        dimension.min = match self.value(min) {
            Some(Value::Scalar(s)) => Some(*s),
            Some(Value::Range { min, .. }) => Some(*min),
            _ => None,
        };
        dimension.max = match self.value(max) {
            Some(Value::Scalar(s)) => Some(*s),
            Some(Value::Range { max, .. }) => Some(*max),
            _ => None,
        };
        dimension
    }
}

/// A rule that matched a node, bundled with its priority information.
#[derive(Debug)]
struct MatchedRule<'a> {
    specificity: Specificity,
    source_order: usize,
    rule: &'a StyleRule,
}

/// Combines the rules known to match a node into its effective style.
///
/// A rule with no declarations matches but contributes nothing.
pub fn resolve<'a>(matching: impl IntoIterator<Item = &'a StyleRule>) -> EffectiveStyle {
    let mut matched: Vec<MatchedRule<'a>> = matching
        .into_iter()
        .map(|rule| MatchedRule {
            specificity: rule.specificity(),
            source_order: rule.order,
            rule,
        })
        .collect();

    // Stable sort: lowest priority first, so later writes win.
    matched.sort_by(|a, b| {
        a.specificity
            .cmp(&b.specificity)
            .then(a.source_order.cmp(&b.source_order))
    });

    let mut style = EffectiveStyle::default();
    for m in matched {
        let origin = RuleOrigin {
            order: m.source_order,
            specificity: m.specificity,
        };
        for decl in &m.rule.declarations {
            style.entries.insert(
                decl.property.clone(),
                StyleEntry {
                    value: decl.value.clone(),
                    origin,
                },
            );
        }
    }
    style
}

/// The core cascade function.
///
/// `ancestors` is ordered from the root to the node's parent.
pub fn compute_style(node: &NodeMeta, ancestors: &[NodeMeta], store: &RuleStore) -> EffectiveStyle {
    let style = resolve(
        store
            .candidates(node)
            .into_iter()
            .filter(|rule| matches(&rule.selector, node, ancestors)),
    );

    log::trace!(
        "CASCADE: Node='{}' Id={:?} Classes={:?} -> {} properties",
        node.type_name,
        node.id,
        node.classes,
        style.len()
    );
    style
}
