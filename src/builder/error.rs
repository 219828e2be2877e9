//! Errors raised while assembling a forest from declarative specs.

use crate::tree::NavigationError;
use thiserror::Error;

/// A single problem found in a declared tree.
///
/// Validation collects every violation before failing, so a caller fixing
/// a large declaration sees all of them at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeViolation {
    #[error("State declared under '{parent}' has an empty name")]
    EmptyName { parent: String },

    #[error("State name '{name}' contains the path separator '{separator}'")]
    SeparatorInName { name: String, separator: char },

    #[error("State '{name}' is declared more than once under '{parent}'")]
    DuplicateName { parent: String, name: String },

    #[error("Policy of '{state}' names '{target}', which is not one of its children")]
    UnknownPolicyTarget { state: String, target: String },

    #[error("Hooks registered for '{path}', which is not a declared state")]
    UnknownHookTarget { path: String },
}

/// Errors returned by [`crate::builder::ForestBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No root states declared. Call .root(spec) before .build()")]
    NoRoots,

    #[error("Declared tree has {} violation(s): {}", violations.len(), summarize(violations))]
    InvalidTree { violations: Vec<TreeViolation> },

    #[error("Failed to attach state: {0}")]
    Attach(#[from] NavigationError),
}

fn summarize(violations: &[TreeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
