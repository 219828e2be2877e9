//! Transition history tracking.
//!
//! Records where the active leaf has been over time. The history is a value:
//! `record` returns a new history and leaves the original untouched.

use super::path::StatePath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statetree::core::{StatePath, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: None,
///     to: StatePath::from_segments(["MainMenu"]),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to.to_string(), "MainMenu");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Active leaf before the transition, `None` on the very first one
    pub from: Option<StatePath>,
    /// Active leaf after the transition
    pub to: StatePath,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use statetree::core::{StateHistory, StatePath, StateTransition};
/// use chrono::Utc;
///
/// let menu = StatePath::from_segments(["MainMenu"]);
/// let climbing = StatePath::from_segments(["InsideGame", "OutsideWorld", "Climbing"]);
///
/// let history = StateHistory::new()
///     .record(StateTransition { from: None, to: menu.clone(), timestamp: Utc::now() })
///     .record(StateTransition { from: Some(menu), to: climbing, timestamp: Utc::now() });
///
/// assert_eq!(history.get_path().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the most recent `limit` transitions.
    pub fn retain_last(mut self, limit: usize) -> Self {
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
        self
    }

    /// Paths visited, in order.
    ///
    /// Starts with the first transition's `from` when there is one, then the
    /// `to` of every transition.
    pub fn get_path(&self) -> Vec<&StatePath> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
