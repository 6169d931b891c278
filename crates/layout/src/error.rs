use thiserror::Error;

use crate::tree::NodeId;

#[derive(Error, Debug)]
pub enum LayoutError {
    /// A node was asked to become a child of itself or of one of its own
    /// descendants. This is a tree-construction bug in the caller.
    #[error("Cyclic tree: {child:?} is {parent:?} or one of its ancestors")]
    CyclicDependency { parent: NodeId, child: NodeId },

    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("Style error: {0}")]
    Style(#[from] tcss::TcssError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, LayoutError>;
