//! Errors reported when a tree is built from parts or a traversal order is parsed.

/// Errors for the checked entry points of this crate. Ordinary tree operations never fail:
/// removing a missing value, asking an empty tree for its minimum, and so on are expressed
/// with no-ops and `None` instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A non-empty node was requested without a value.
    #[error("a tree node can't be built without a value")]
    MissingValue,
    /// The left subtree holds a value that is not less than the node value.
    #[error("left subtree holds a value not less than the node value")]
    LeftOrder,
    /// The right subtree holds a value that is not greater than the node value.
    #[error("right subtree holds a value not greater than the node value")]
    RightOrder,
    /// The named traversal order is not one of pre-order, post-order or in-order.
    #[error("unsupported traversal order: {0:?}")]
    UnsupportedTraversal(String),
}
