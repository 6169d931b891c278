//! netdash: a terminal network-monitoring dashboard laid out with TCSS.
//!
//! The dashboard is data: a stylesheet ([`DASHBOARD_TCSS`]) and a node
//! tree ([`Dashboard::build`]). The [`tcss_layout::LayoutEngine`] turns
//! them into cell rectangles on every resize, class change or panel
//! toggle.

pub mod content;
pub mod dashboard;
pub mod error;

pub use content::ContentMeasure;
pub use dashboard::{BREAKPOINT_HOST, DASHBOARD_TCSS, Dashboard, renderable_width, stylesheet};
pub use error::{NetdashError, Result};
