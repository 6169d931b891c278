//! Responsive breakpoints and the 12-unit column grid.
//!
//! A breakpoint host carries exactly one tier class (`-lg`, `-md` or
//! `-sm`) picked from its solved width. The grid stylesheet keys off that
//! class: inside a `-md` host, `.col` elements are hidden unless they also
//! carry a `col-md-N` class, which gives them an `N`-fraction share.
//!
//! ```css
//! .-md .col { display: none; }
//! .-md .col-md-8 { display: block; width: 8fr; }
//! .col-4 { width: 4fr; }
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use smallvec::SmallVec;
use tcss::TcssError;
use tcss::parser::{StyleRule, parse_stylesheet};

/// Number of units in a grid row.
pub const GRID_COLUMNS: u8 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Sm,
    Md,
    Lg,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Sm, Tier::Md, Tier::Lg];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Sm => "sm",
            Tier::Md => "md",
            Tier::Lg => "lg",
        }
    }

    /// The class applied to the breakpoint host.
    pub fn class(self) -> &'static str {
        match self {
            Tier::Sm => "-sm",
            Tier::Md => "-md",
            Tier::Lg => "-lg",
        }
    }

    pub fn is_tier_class(class: &str) -> bool {
        Tier::ALL.iter().any(|t| t.class() == class)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width thresholds, kept in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakpoints {
    thresholds: SmallVec<[(i32, Tier); 3]>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new([(0, Tier::Sm), (60, Tier::Md), (120, Tier::Lg)])
    }
}

impl Breakpoints {
    pub fn new(thresholds: impl IntoIterator<Item = (i32, Tier)>) -> Self {
        let mut thresholds: SmallVec<[(i32, Tier); 3]> = thresholds.into_iter().collect();
        thresholds.sort_by_key(|(width, _)| *width);
        Self { thresholds }
    }

    /// The last tier whose threshold `width` reaches. Widths below every
    /// threshold fall into the smallest tier.
    ///
    /// ```
    /// use tcss_layout::responsive::{Breakpoints, Tier};
    ///
    /// let breakpoints = Breakpoints::default();
    /// assert_eq!(breakpoints.tier_for(119), Tier::Md);
    /// assert_eq!(breakpoints.tier_for(120), Tier::Lg);
    /// ```
    pub fn tier_for(&self, width: i32) -> Tier {
        let mut tier = self.thresholds.first().map_or(Tier::Sm, |(_, t)| *t);
        for (threshold, candidate) in &self.thresholds {
            if width >= *threshold {
                tier = *candidate;
            }
        }
        tier
    }

    pub fn thresholds(&self) -> &[(i32, Tier)] {
        &self.thresholds
    }
}

/// TCSS source of the grid.
pub static GRID_TCSS: Lazy<String> = Lazy::new(|| {
    let mut css = String::new();
    for tier in Tier::ALL {
        let t = tier.name();
        css.push_str(&format!(".-{t} .col {{ display: none; }}\n"));
        for n in 1..=GRID_COLUMNS {
            css.push_str(&format!(
                ".-{t} .col-{t}-{n} {{ display: block; width: {n}fr; }}\n"
            ));
        }
    }
    for n in 1..=GRID_COLUMNS {
        css.push_str(&format!(".col-{n} {{ width: {n}fr; }}\n"));
    }
    css
});

/// Parses [`GRID_TCSS`] into rules, ready to be loaded ahead of an
/// application stylesheet.
pub fn grid_rules() -> Result<Vec<StyleRule>, TcssError> {
    Ok(parse_stylesheet(&GRID_TCSS)?.into_rules())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcss::types::{Display, Scalar};
    use tcss::{NodeMeta, RuleStore, compute_style};

    #[test]
    fn default_tiers() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.tier_for(0), Tier::Sm);
        assert_eq!(breakpoints.tier_for(59), Tier::Sm);
        assert_eq!(breakpoints.tier_for(60), Tier::Md);
        assert_eq!(breakpoints.tier_for(200), Tier::Lg);
    }

    #[test]
    fn thresholds_are_sorted() {
        let breakpoints = Breakpoints::new([(100, Tier::Lg), (0, Tier::Sm), (40, Tier::Md)]);
        assert_eq!(breakpoints.thresholds()[0], (0, Tier::Sm));
        assert_eq!(breakpoints.tier_for(99), Tier::Md);
        assert_eq!(breakpoints.tier_for(-5), Tier::Sm);
    }

    #[test]
    fn grid_has_a_rule_per_class() {
        let rules = grid_rules().unwrap();
        assert_eq!(rules.len(), 3 * (1 + 12) + 12);
    }

    #[test]
    fn column_without_tier_class_is_hidden() {
        let store = RuleStore::load(grid_rules().unwrap()).unwrap();
        let host = NodeMeta::new("Vertical").with_classes("-sm");
        let wide = NodeMeta::new("Metric").with_classes("col col-lg-2 col-md-2");
        let full = NodeMeta::new("Horizontal").with_classes("col col-md-8 col-sm-12");

        let wide_style = compute_style(&wide, std::slice::from_ref(&host), &store);
        assert_eq!(wide_style.display(), Display::None);

        let full_style = compute_style(&full, std::slice::from_ref(&host), &store);
        assert_eq!(full_style.display(), Display::Block);
        assert_eq!(full_style.width().base, Scalar::fraction(12.0));
    }

    #[test]
    fn static_columns_ignore_tiers() {
        let store = RuleStore::load(grid_rules().unwrap()).unwrap();
        let metric = NodeMeta::new("Metric").with_classes("col-4");
        let style = compute_style(&metric, &[], &store);
        assert_eq!(style.width().base, Scalar::fraction(4.0));
    }
}
