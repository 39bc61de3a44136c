//! Menu error types.
//!
//! Structural errors name the items involved so a failing call site can be
//! found from the message alone. No structural operation mutates the tree
//! before it has validated its input.

use thiserror::Error;

/// Errors raised by menu tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The item already has a parent and must be removed from it first.
    #[error("cannot add menu item '{name}' as child, it already belongs to another menu (has a parent)")]
    AlreadyAttached { name: String },

    /// The item would become its own ancestor.
    #[error("cannot add menu item '{name}' beneath itself or one of its descendants")]
    CyclicAttachment { name: String },

    /// A sibling already uses the name.
    #[error("menu item '{parent}' already has a child named '{name}'")]
    DuplicateName { parent: String, name: String },

    /// The supplied order does not name every child exactly once.
    #[error("cannot reorder children of '{parent}': order must name all {expected} children exactly once, got {actual} names")]
    ReorderMismatch {
        parent: String,
        expected: usize,
        actual: usize,
    },

    /// The named child does not exist.
    #[error("menu item '{parent}' has no child named '{name}'")]
    UnknownChild { parent: String, name: String },

    /// The operation needs a parent but the item is a root.
    #[error("menu item '{name}' has no parent")]
    Detached { name: String },

    /// The route resolver rejected the item's route.
    #[error("problem with menu item \"{label}\": {message}")]
    RouteResolution { label: String, message: String },
}

impl MenuError {
    /// Create a duplicate name error.
    pub fn duplicate_name(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            parent: parent.into(),
            name: name.into(),
        }
    }

    /// Create an unknown child error.
    pub fn unknown_child(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownChild {
            parent: parent.into(),
            name: name.into(),
        }
    }

    /// Wrap a resolver failure with the label of the offending item.
    pub fn route_resolution(label: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::RouteResolution {
            label: label.into(),
            message: cause.to_string(),
        }
    }
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
