//! Navigation errors and transition outcomes.

use super::node::NodeId;
use thiserror::Error;

/// What a successful navigation call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// At least one node was exited or entered
    Switched,

    /// The request named what was already active; no hooks ran
    Unchanged,
}

impl TransitionOutcome {
    pub fn is_switched(self) -> bool {
        matches!(self, Self::Switched)
    }
}

/// Reasons a navigation request was refused.
///
/// Every variant is non-fatal: the tree is left exactly as it was before the
/// failing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Root state '{name}' not found")]
    RootNotFound { name: String },

    #[error("State '{name}' not found under '{parent}'")]
    StateNotFound { parent: String, name: String },

    #[error("Transition from {from:?} to '{to}' is not allowed under '{parent}'")]
    TransitionDisallowed {
        parent: String,
        from: Option<String>,
        to: String,
    },

    #[error("Invalid state path '{path}'")]
    InvalidPath { path: String },

    #[error("State '{name}' is not active")]
    NotActive { name: String },

    #[error("Cannot replace state '{name}' while it is active")]
    ChildActive { name: String },

    #[error("No state node with id {0:?}")]
    UnknownNode(NodeId),

    #[error("No root state is active")]
    NoActiveState,
}
