//! Narrow navigation surface handed to collaborators.

use super::error::{NavigationError, TransitionOutcome};
use super::forest::StateForest;

/// What gameplay systems need from the state machine.
///
/// Collaborators take `&mut impl StateNavigator` (or `&impl` for read-only
/// queries) instead of reaching for a global instance, which also lets tests
/// substitute a fake.
pub trait StateNavigator {
    fn switch_to_state(&mut self, path: &str) -> Result<TransitionOutcome, NavigationError>;

    fn current_state_path(&self) -> String;

    fn is_in_state(&self, name: &str) -> bool;
}

impl StateNavigator for StateForest {
    fn switch_to_state(&mut self, path: &str) -> Result<TransitionOutcome, NavigationError> {
        StateForest::switch_to_state(self, path)
    }

    fn current_state_path(&self) -> String {
        StateForest::current_state_path(self)
    }

    fn is_in_state(&self, name: &str) -> bool {
        StateForest::is_in_state(self, name)
    }
}
