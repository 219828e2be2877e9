//! Per-node transition tables.
//!
//! Every node carries one [`TransitionPolicy`]. The policy is the node's
//! admission gate: it is consulted after the target is known to be a
//! registered child and before anything is exited or entered.

use super::guard::{Guard, TransitionRequest};
use std::collections::{BTreeMap, BTreeSet};

/// Which children a node may switch to.
#[derive(Clone, Debug, Default)]
pub enum TransitionPolicy {
    /// Any registered child.
    #[default]
    AnyChild,

    /// Only the listed children, regardless of which child is current.
    AllowList(BTreeSet<String>),

    /// Current child name to the children reachable from it. With no current
    /// child every registered child is admitted; a current child missing from
    /// the table admits nothing.
    Table(BTreeMap<String, BTreeSet<String>>),

    /// Arbitrary predicate.
    Guarded(Guard),
}

impl TransitionPolicy {
    /// Closed allow-list from names.
    ///
    /// ```rust
    /// use statetree::core::{TransitionPolicy, TransitionRequest};
    ///
    /// let policy = TransitionPolicy::allow(["Sailing", "Telescope"]);
    /// let req = TransitionRequest { parent: "InsideWorld", from: None, to: "Climbing" };
    /// assert!(!policy.admits(&req));
    /// ```
    pub fn allow<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowList(names.into_iter().map(Into::into).collect())
    }

    /// Table from `(from, [to, ...])` rows.
    pub fn table<I, S, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self::Table(
            rows.into_iter()
                .map(|(from, to)| (from.into(), to.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    pub fn guarded<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionRequest<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Guarded(Guard::new(predicate))
    }

    /// Whether the policy admits `request`. Registration is checked by the
    /// caller; this only applies the node's own restriction.
    pub fn admits(&self, request: &TransitionRequest<'_>) -> bool {
        match self {
            Self::AnyChild => true,
            Self::AllowList(allowed) => allowed.contains(request.to),
            Self::Table(rows) => match request.from {
                None => true,
                Some(from) => rows.get(from).is_some_and(|next| next.contains(request.to)),
            },
            Self::Guarded(guard) => guard.check(request),
        }
    }

    /// Child names the policy mentions explicitly. Used to validate that the
    /// table only refers to children that exist.
    pub fn referenced_names(&self) -> BTreeSet<&str> {
        match self {
            Self::AnyChild | Self::Guarded(_) => BTreeSet::new(),
            Self::AllowList(allowed) => allowed.iter().map(String::as_str).collect(),
            Self::Table(rows) => rows
                .iter()
                .flat_map(|(from, to)| {
                    std::iter::once(from.as_str()).chain(to.iter().map(String::as_str))
                })
                .collect(),
        }
    }
}
