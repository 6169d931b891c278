pub mod geometry;
pub mod layout;

pub use geometry::{Scalar, Spacing, Unit};
pub use layout::{Display, Layout, Overflow};
