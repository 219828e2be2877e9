//! Transition notifications.

use crate::core::{CameraMode, InputMap, StatePath};
use serde::{Deserialize, Serialize};

/// Something that happened during a transition.
///
/// Events are queued while a transition runs and handed to observers in the
/// order they were produced, after the transition has fully completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StateEvent {
    /// A node became active. Carries the node's resolved tags.
    Entered {
        path: StatePath,
        input_map: Option<InputMap>,
        camera: Option<CameraMode>,
    },

    /// A node stopped being active.
    Exited { path: StatePath },

    /// The active root changed.
    Transition {
        previous: Option<StatePath>,
        current: StatePath,
    },
}

impl StateEvent {
    /// Path of the node the event is about (the new root for `Transition`).
    pub fn path(&self) -> &StatePath {
        match self {
            Self::Entered { path, .. } | Self::Exited { path } => path,
            Self::Transition { current, .. } => current,
        }
    }
}

/// Receives [`StateEvent`]s from a forest.
pub trait StateObserver: Send {
    fn on_event(&mut self, event: &StateEvent);
}

impl<F> StateObserver for F
where
    F: FnMut(&StateEvent) + Send,
{
    fn on_event(&mut self, event: &StateEvent) {
        self(event)
    }
}

/// Handle returned by [`crate::tree::StateForest::subscribe`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObserverId(pub(crate) u64);
