//! The rule store and the active rule set.
//!
//! A [`RuleStore`] is built once from an ordered rule sequence and never
//! mutated afterwards. Each rule's `order` is its index in that sequence,
//! which the cascade uses to break specificity ties. Rules are also indexed
//! by the key of their subject compound (id, else class, else type name)
//! so that matching only has to look at plausible candidates.
//!
//! [`ActiveRules`] is the process-level "current rule set": readers take an
//! `Arc` snapshot, a reload swaps the whole store in one write.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::TcssError;
use crate::matcher::NodeMeta;
use crate::parser::{Selector, StyleRule, parse_stylesheet};

#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<StyleRule>,
    by_id: HashMap<String, Vec<usize>>,
    by_class: HashMap<String, Vec<usize>>,
    by_type: HashMap<String, Vec<usize>>,
    universal: Vec<usize>,
}

impl RuleStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads an ordered rule sequence.
    ///
    /// Every selector is validated up front; one invalid selector rejects
    /// the whole set with [`TcssError::InvalidSelector`].
    pub fn load(rules: impl IntoIterator<Item = StyleRule>) -> Result<Self, TcssError> {
        let mut store = Self::default();

        for (order, mut rule) in rules.into_iter().enumerate() {
            rule.selector.validate()?;
            rule.order = order;

            match index_key(&rule) {
                Some(Selector::Id(id)) => store.by_id.entry(id.clone()).or_default().push(order),
                Some(Selector::Class(class)) => {
                    store.by_class.entry(class.clone()).or_default().push(order)
                }
                Some(Selector::Type(name)) => {
                    store.by_type.entry(name.clone()).or_default().push(order)
                }
                Some(Selector::Universal) | None => store.universal.push(order),
            }
            store.rules.push(rule);
        }

        log::debug!(
            "rule store loaded: {} rules ({} ids, {} classes, {} types, {} universal)",
            store.rules.len(),
            store.by_id.len(),
            store.by_class.len(),
            store.by_type.len(),
            store.universal.len()
        );
        Ok(store)
    }

    /// Parses TCSS source and loads the resulting rules.
    pub fn from_source(source: &str) -> Result<Self, TcssError> {
        Self::load(parse_stylesheet(source)?.into_rules())
    }

    /// Builds a new store with `more` appended after this store's rules.
    pub fn extended(&self, more: impl IntoIterator<Item = StyleRule>) -> Result<Self, TcssError> {
        Self::load(self.rules.iter().cloned().chain(more))
    }

    /// All rules, in declaration order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn get(&self, order: usize) -> Option<&StyleRule> {
        self.rules.get(order)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that could match `node`, in declaration order.
    ///
    /// This is a pre-filter on the subject compound's key only; the
    /// selector matcher makes the final decision.
    pub fn candidates(&self, node: &NodeMeta) -> Vec<&StyleRule> {
        let mut orders: Vec<usize> = self.universal.clone();
        if let Some(id) = &node.id {
            orders.extend(self.by_id.get(id).into_iter().flatten());
        }
        for class in &node.classes {
            orders.extend(self.by_class.get(class).into_iter().flatten());
        }
        orders.extend(self.by_type.get(node.type_name).into_iter().flatten());

        orders.sort_unstable();
        orders.dedup();
        orders.into_iter().map(|order| &self.rules[order]).collect()
    }
}

/// Picks the most selective simple selector of the subject compound.
fn index_key(rule: &StyleRule) -> Option<&Selector> {
    let rank = |s: &Selector| match s {
        Selector::Id(_) => 0,
        Selector::Class(_) => 1,
        Selector::Type(_) => 2,
        Selector::Universal => 3,
    };
    rule.selector
        .subject()?
        .selectors
        .iter()
        .min_by_key(|s| rank(s))
}

/// The current rule set, swapped atomically on reload.
///
/// ```
/// use std::sync::Arc;
/// use tcss::store::{ActiveRules, RuleStore};
///
/// let active = ActiveRules::new(RuleStore::from_source("Label { width: 1fr; }").unwrap());
/// let before = active.snapshot();
/// active.swap(Arc::new(RuleStore::empty()));
///
/// // The old snapshot is untouched by the swap.
/// assert_eq!(before.len(), 1);
/// assert!(active.snapshot().is_empty());
/// assert_eq!(active.generation(), 1);
/// ```
#[derive(Debug)]
pub struct ActiveRules {
    current: RwLock<(u64, Arc<RuleStore>)>,
}

impl ActiveRules {
    pub fn new(store: RuleStore) -> Self {
        Self {
            current: RwLock::new((0, Arc::new(store))),
        }
    }

    /// The store in effect right now. Holding the `Arc` pins it even if a
    /// reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<RuleStore> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard.1)
    }

    /// Number of swaps since creation.
    pub fn generation(&self) -> u64 {
        self.current.read().unwrap_or_else(PoisonError::into_inner).0
    }

    /// Replaces the whole store and returns the superseded one.
    pub fn swap(&self, store: Arc<RuleStore>) -> Arc<RuleStore> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.0 += 1;
        log::debug!("rule set swapped: generation {}, {} rules", guard.0, store.len());
        std::mem::replace(&mut guard.1, store)
    }
}
