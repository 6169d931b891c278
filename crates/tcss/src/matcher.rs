//! Selector matching.
//!
//! A selector is matched right to left: its subject compound against the
//! node, then each compound to the left against the ancestor chain. The
//! chain is ordered from the root down to the node's parent.
//!
//! - Type selectors match `NodeMeta::type_name`
//! - Class selectors match any class in `NodeMeta::classes`
//! - ID selectors match `NodeMeta::id`
//! - `>` requires the immediate parent, whitespace any ancestor
//!
//! Matching is a pure function of its inputs.

use smallvec::SmallVec;

use crate::parser::{Combinator, ComplexSelector, CompoundSelector, Selector, SelectorPart};

/// Identity of a node as seen by selectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMeta {
    /// The node's type name (e.g., "Horizontal", "DataTable").
    /// Static str to avoid allocation on every style resolution call.
    pub type_name: &'static str,
    /// The node's id, if set (e.g., "metrics_container").
    pub id: Option<String>,
    /// The node's CSS classes (e.g., ["col", "col-lg-4"]).
    pub classes: SmallVec<[String; 4]>,
}

impl NodeMeta {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            id: None,
            classes: SmallVec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds whitespace-separated classes, skipping duplicates.
    pub fn with_classes(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns true if the class was not present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Checks if this node matches a simple selector.
    pub fn matches_selector(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Type(name) => self.type_name == name.as_str(),
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.has_class(class),
            Selector::Universal => true,
        }
    }

    /// Checks if every simple selector of a compound matches this node.
    pub fn matches_compound(&self, compound: &CompoundSelector) -> bool {
        compound.selectors.iter().all(|s| self.matches_selector(s))
    }
}

/// Checks whether `selector` applies to `node`.
///
/// `ancestors` is ordered from the root to the node's parent.
pub fn matches(selector: &ComplexSelector, node: &NodeMeta, ancestors: &[NodeMeta]) -> bool {
    let Some((subject, rest)) = selector.parts.split_last() else {
        return false;
    };
    node.matches_compound(&subject.compound) && match_ancestors(rest, ancestors)
}

/// Matches the remaining parts (right to left) against the ancestor chain.
///
/// Each part's combinator describes its relation to the part on its right,
/// which has already been matched to the node just below `ancestors`.
fn match_ancestors(parts: &[SelectorPart], ancestors: &[NodeMeta]) -> bool {
    let Some((part, rest)) = parts.split_last() else {
        return true;
    };

    match part.combinator {
        Combinator::Child => match ancestors.split_last() {
            Some((parent, above)) => {
                parent.matches_compound(&part.compound) && match_ancestors(rest, above)
            }
            None => false,
        },
        // Backtrack over every candidate ancestor so that a nearer match
        // failing further left does not hide a farther one.
        Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
            ancestors[i].matches_compound(&part.compound) && match_ancestors(rest, &ancestors[..i])
        }),
        Combinator::None => false,
    }
}
