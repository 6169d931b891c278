//! # TCSS - Terminal CSS rules and cascade
//!
//! A Rust implementation of the CSS subset used to style terminal dashboards.
//! This crate turns stylesheet text into an immutable rule store and
//! resolves, for any node, the one effective value of each property.
//!
//! - **Parsing**: Convert TCSS source text into a [`StyleSheet`](parser::StyleSheet)
//! - **Rule store**: Ordered, validated, indexed rules ([`RuleStore`])
//! - **Matching**: Right-to-left selector matching against an ancestor chain
//! - **Cascade**: Specificity then source order ([`EffectiveStyle`])
//!
//! ## Quick Start
//!
//! ```rust
//! use tcss::{NodeMeta, RuleStore, compute_style};
//! use tcss::types::Scalar;
//!
//! let store = RuleStore::from_source(r#"
//!     #metrics_container .metrics { width: 1fr; }
//!     .metrics { width: 2fr; }
//! "#).expect("valid TCSS");
//!
//! let ancestors = [NodeMeta::new("Horizontal").with_id("metrics_container")];
//! let node = NodeMeta::new("Metric").with_classes("metrics");
//!
//! // The id rule wins regardless of source order.
//! let style = compute_style(&node, &ancestors, &store);
//! assert_eq!(style.width().base, Scalar::fraction(1.0));
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type selectors: `DataTable`, `Footer`
//! - Class selectors: `.metrics`, `.col-lg-4`
//! - ID selectors: `#help_panel`
//! - Universal selector: `*`
//! - Compound selectors: `Container.metrics#first`
//! - Descendant combinator: `#app_vertical Label`
//! - Child combinator: `Horizontal > .metrics`
//!
//! ### Units
//! - Cells (default): `10`, `20`
//! - Percentage: `50%`, `100%`
//! - Viewport: `50vw`, `100vh`
//! - Fraction: `1fr`, `2fr`
//! - Auto: `auto`
//! - Ranges: `minmax(30, 33%)`
//!
//! Properties outside the layout set (colors, borders, alignment...) are
//! kept as opaque tokens.
//!
//! ## Modules
//!
//! - [`parser`]: TCSS parsing and stylesheet data structures
//! - [`types`]: Geometry and layout keyword types
//! - [`matcher`]: Node identity and selector matching
//! - [`store`]: The rule store and the swappable active rule set
//! - [`cascade`]: Effective style resolution
//! - [`error`]: Error types for parsing and loading failures

pub mod cascade;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod store;
pub mod types;

pub use cascade::{Dimension, EffectiveStyle, RuleOrigin, compute_style, resolve};
pub use error::TcssError;
pub use matcher::{NodeMeta, matches};
pub use store::{ActiveRules, RuleStore};
