//! Layout control types.
//!
//! - [`Layout`]: The axis along which a container stacks its children
//! - [`Display`]: Whether a node takes part in layout at all
//! - [`Overflow`]: What the caller should do when children do not fit
//!
//! ## CSS Syntax
//!
//! ```css
//! #metrics_container { layout: horizontal; }
//! .col { display: none; }
//! #table_container { overflow-y: auto; }
//! ```

/// Direction in which a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Children stack top-to-bottom (default).
    #[default]
    Vertical,
    /// Children stack left-to-right.
    Horizontal,
}

/// Controls whether a node is rendered and participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Node is laid out as a block (default).
    #[default]
    Block,
    /// Node takes no space and receives an empty region.
    None,
}

/// Controls how content exceeding container bounds is handled.
///
/// The layout engine never clips by itself; it reports overflow and
/// carries this policy so the renderer can clip or scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Clip content that exceeds bounds (default).
    #[default]
    Hidden,
    /// Show scrollbars only when content overflows.
    Auto,
    /// Always show scrollbars.
    Scroll,
}
