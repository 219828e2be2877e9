//! Guard predicates for controlling child transitions.
//!
//! Guards are pure boolean functions that decide whether a node may switch
//! its active child. They run before any hook fires, so a rejected request
//! leaves the tree untouched.

use std::fmt;
use std::sync::Arc;

/// A request to switch `parent`'s active child from `from` to `to`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransitionRequest<'a> {
    /// Name of the node whose child is changing
    pub parent: &'a str,
    /// Currently active child, if any
    pub from: Option<&'a str>,
    /// Requested child
    pub to: &'a str,
}

type Predicate = dyn Fn(&TransitionRequest<'_>) -> bool + Send + Sync;

/// Pure predicate that determines if a child transition can execute.
///
/// # Example
///
/// ```rust
/// use statetree::core::{Guard, TransitionRequest};
///
/// // Never leave the summit once it is reached.
/// let guard = Guard::new(|req: &TransitionRequest<'_>| req.from != Some("MountainTop"));
///
/// assert!(guard.check(&TransitionRequest {
///     parent: "OutsideWorld",
///     from: Some("Climbing"),
///     to: "MountainTop",
/// }));
/// assert!(!guard.check(&TransitionRequest {
///     parent: "OutsideWorld",
///     from: Some("MountainTop"),
///     to: "Climbing",
/// }));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<Predicate>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionRequest<'_>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard admits `request`.
    pub fn check(&self, request: &TransitionRequest<'_>) -> bool {
        (self.predicate)(request)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
