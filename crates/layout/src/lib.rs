//! Fractional box layout for TCSS-styled terminal UIs.
//!
//! The crate turns the effective styles computed by [`tcss`] into integer
//! cell rectangles:
//!
//! - [`tree::UiTree`] owns the nodes in an arena.
//! - [`layouts`] solves one container at a time: fixed and percent sizes
//!   first, then `fr` shares of what is left, then min/max clamps.
//! - [`walker::relayout`] drives the solver over the dirty parts of the tree.
//! - [`invalidation::mark_dirty`] records what an event made stale.
//! - [`engine::LayoutEngine`] queues events and commits whole frames.
//!
//! ```
//! use tcss::{NodeMeta, RuleStore};
//! use tcss_layout::{Event, EngineConfig, LayoutEngine, NoMeasure, Region, UiTree};
//!
//! let mut tree = UiTree::new(NodeMeta::new("Screen"));
//! let root = tree.root();
//! let sidebar = tree.add_child(root, NodeMeta::new("Static").with_id("sidebar")).unwrap();
//! let body = tree.add_child(root, NodeMeta::new("Static").with_id("body")).unwrap();
//!
//! let rules = RuleStore::from_source(
//!     "Screen { layout: horizontal; } #sidebar { width: 20; } #body { width: 1fr; }",
//! ).unwrap();
//! let mut engine = LayoutEngine::new(tree, rules, NoMeasure, EngineConfig::default());
//!
//! engine.post(Event::Resize { width: 80, height: 24 });
//! let frame = engine.frame().unwrap();
//! assert_eq!(frame.region(sidebar), Some(Region::new(0, 0, 20, 24)));
//! assert_eq!(frame.region(body), Some(Region::new(20, 0, 60, 24)));
//! ```

pub mod engine;
pub mod error;
pub mod fraction;
pub mod geometry;
pub mod invalidation;
pub mod layouts;
mod log_init;
pub mod measure;
pub mod responsive;
pub mod tree;
pub mod walker;

pub use engine::{EngineConfig, Event, Frame, LayoutEngine};
pub use error::{LayoutError, Result};
pub use fraction::Fraction;
pub use geometry::{Region, Size};
pub use invalidation::{DirtyFlags, DirtyReason, mark_dirty};
pub use layouts::{Arrangement, Axis, Layout, LayoutChild, OverflowCondition, solve};
pub use log_init::{init_logger, init_logger_with_level};
pub use measure::{IntrinsicSize, Measure, NoMeasure};
pub use responsive::{Breakpoints, Tier, grid_rules};
pub use tree::{NodeId, UiNode, UiTree};
pub use walker::{LayoutReport, NodeOverflow, relayout};

// Re-export the log crate so front ends can use tcss_layout::log::info!, etc.
pub use log;
