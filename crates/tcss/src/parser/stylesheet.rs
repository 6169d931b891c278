use std::fmt;
use std::ops::Add;

use phf::phf_map;

use crate::TcssError;
use crate::types::{Display, Layout, Overflow, Scalar, Spacing};

/// CSS specificity for determining rule precedence.
///
/// Compared lexicographically: any id outranks any number of classes, any
/// class outranks any number of type names. The universal selector adds
/// nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Specificity {
            ids: self.ids + rhs.ids,
            classes: self.classes + rhs.classes,
            types: self.types + rhs.types,
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
}

impl Selector {
    pub fn specificity(&self) -> Specificity {
        match self {
            Selector::Id(_) => Specificity {
                ids: 1,
                ..Default::default()
            },
            Selector::Class(_) => Specificity {
                classes: 1,
                ..Default::default()
            },
            Selector::Type(_) => Specificity {
                types: 1,
                ..Default::default()
            },
            Selector::Universal => Specificity::default(),
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Selector::Type(s) | Selector::Class(s) | Selector::Id(s) => Some(s),
            Selector::Universal => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => f.write_str(name),
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
            Selector::Universal => f.write_str("*"),
        }
    }
}

/// Simple selectors that must all match the same node (e.g. `Label.col#x`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(Selector::specificity)
            .fold(Specificity::default(), Add::add)
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.selectors {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Relationship between a compound selector and the one to its right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Terminates the selector; only valid on the rightmost part.
    None,
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the immediate parent.
    Child,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// A full selector: compounds joined by combinators, read left to right.
/// The rightmost compound (the subject) must match the node itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|p| p.compound.specificity())
            .fold(Specificity::default(), Add::add)
    }

    /// The compound that must match the node being styled.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.parts.last().map(|p| &p.compound)
    }

    /// Checks the structural rules a parsed or hand-built selector must obey.
    pub fn validate(&self) -> Result<(), TcssError> {
        let invalid = |reason: &str| Err(TcssError::InvalidSelector(format!("{self}: {reason}")));

        let Some((last, rest)) = self.parts.split_last() else {
            return invalid("empty selector");
        };
        if last.combinator != Combinator::None {
            return invalid("trailing combinator");
        }
        if rest.iter().any(|p| p.combinator == Combinator::None) {
            return invalid("missing combinator between compounds");
        }
        for part in &self.parts {
            if part.compound.selectors.is_empty() {
                return invalid("empty compound selector");
            }
            for s in &part.compound.selectors {
                if let Some(name) = s.name() {
                    if !is_ident(name) {
                        return invalid("malformed identifier");
                    }
                }
            }
            let ids = part
                .compound
                .selectors
                .iter()
                .filter(|s| matches!(s, Selector::Id(_)))
                .count();
            let types = part
                .compound
                .selectors
                .iter()
                .filter(|s| matches!(s, Selector::Type(_) | Selector::Universal))
                .count();
            if ids > 1 {
                return invalid("compound selector names more than one id");
            }
            if types > 1 {
                return invalid("compound selector names more than one type");
            }
        }
        Ok(())
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part.compound)?;
            match part.combinator {
                Combinator::None => {}
                Combinator::Descendant => f.write_str(" ")?,
                Combinator::Child => f.write_str(" > ")?,
            }
        }
        Ok(())
    }
}

/// Identifier rule shared by the parser and [`ComplexSelector::validate`].
pub(crate) fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    name != "-" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A style property. Layout properties are typed; everything else is an
/// opaque name carried through to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    Margin,
    Padding,
    Display,
    Layout,
    OverflowX,
    OverflowY,
    Other(String),
}

static LAYOUT_PROPERTIES: phf::Map<&'static str, Property> = phf_map! {
    "width" => Property::Width,
    "height" => Property::Height,
    "min-width" => Property::MinWidth,
    "max-width" => Property::MaxWidth,
    "min-height" => Property::MinHeight,
    "max-height" => Property::MaxHeight,
    "margin" => Property::Margin,
    "padding" => Property::Padding,
    "display" => Property::Display,
    "layout" => Property::Layout,
    "overflow-x" => Property::OverflowX,
    "overflow-y" => Property::OverflowY,
};

impl Property {
    pub fn from_name(name: &str) -> Self {
        LAYOUT_PROPERTIES
            .get(name)
            .cloned()
            .unwrap_or_else(|| Property::Other(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Property::Width => "width",
            Property::Height => "height",
            Property::MinWidth => "min-width",
            Property::MaxWidth => "max-width",
            Property::MinHeight => "min-height",
            Property::MaxHeight => "max-height",
            Property::Margin => "margin",
            Property::Padding => "padding",
            Property::Display => "display",
            Property::Layout => "layout",
            Property::OverflowX => "overflow-x",
            Property::OverflowY => "overflow-y",
            Property::Other(name) => name,
        }
    }

    /// True for properties the layout engine interprets.
    pub fn is_layout(&self) -> bool {
        !matches!(self, Property::Other(_))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The right-hand side of a declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// `minmax(min, max)`: a dimension based on `max` that never shrinks
    /// below `min`.
    Range {
        min: Scalar,
        max: Scalar,
    },
    Spacing(Spacing),
    Display(Display),
    Layout(Layout),
    Overflow(Overflow),
    /// Uninterpreted text (colors, alignment, border styles, ...).
    Token(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{s}"),
            Value::Range { min, max } => write!(f, "minmax({min}, {max})"),
            Value::Spacing(s) => write!(f, "{} {} {} {}", s.top, s.right, s.bottom, s.left),
            Value::Display(d) => write!(f, "{d:?}"),
            Value::Layout(l) => write!(f, "{l:?}"),
            Value::Overflow(o) => write!(f, "{o:?}"),
            Value::Token(t) => f.write_str(t),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: Property,
    pub value: Value,
}

impl Declaration {
    pub fn new(property: Property, value: Value) -> Self {
        Self { property, value }
    }
}

/// One selector with its declarations.
///
/// `order` is the rule's position in the loaded rule sequence; the
/// [`RuleStore`](crate::store::RuleStore) assigns it and uses it to break
/// specificity ties.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule {
    pub selector: ComplexSelector,
    pub declarations: Vec<Declaration>,
    pub order: usize,
}

impl StyleRule {
    pub fn new(selector: ComplexSelector, declarations: Vec<Declaration>) -> Self {
        Self {
            selector,
            declarations,
            order: 0,
        }
    }

    /// Builds a rule from selector text and a declaration block body.
    ///
    /// ```
    /// use tcss::parser::StyleRule;
    ///
    /// let rule = StyleRule::parse(".-md .col-md-3", "display: block; width: 3fr;").unwrap();
    /// assert_eq!(rule.declarations.len(), 2);
    /// ```
    pub fn parse(selector: &str, declarations: &str) -> Result<Self, TcssError> {
        let selector = super::selectors::parse_selector(selector)?;
        let declarations = super::parse_declaration_block(declarations)?;
        Ok(Self::new(selector, declarations))
    }

    pub fn specificity(&self) -> Specificity {
        self.selector.specificity()
    }
}

/// A parsed stylesheet: rules in source order.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn into_rules(self) -> Vec<StyleRule> {
        self.rules
    }
}
