//! Translates entered states into input-map and camera selections.
//!
//! The bridge is an ordinary [`StateObserver`]. It reads the tags the forest
//! resolved for each entered node and forwards them to two collaborators.
//! The state tree never learns these collaborators exist.

use super::event::{StateEvent, StateObserver};
use crate::core::{CameraMode, InputMap};

/// Switches the active input action map.
pub trait InputMapSelector: Send {
    fn select_input_map(&mut self, map: InputMap);
}

/// Switches the active camera rig.
///
/// Implementations typically start a timed blend and return immediately.
pub trait CameraModeSelector: Send {
    fn select_camera_mode(&mut self, mode: CameraMode);
}

/// Selector that ignores every request, for hosts without one of the two
/// collaborators.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSelector;

impl InputMapSelector for NoSelector {
    fn select_input_map(&mut self, _map: InputMap) {}
}

impl CameraModeSelector for NoSelector {
    fn select_camera_mode(&mut self, _mode: CameraMode) {}
}

/// Observer that drives an [`InputMapSelector`] and a [`CameraModeSelector`].
///
/// The two lookups are independent: an entered node may trigger either,
/// both, or neither call.
#[derive(Debug)]
pub struct TransitionBridge<I, C> {
    input: I,
    camera: C,
}

impl<I, C> TransitionBridge<I, C>
where
    I: InputMapSelector,
    C: CameraModeSelector,
{
    pub fn new(input: I, camera: C) -> Self {
        Self { input, camera }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn into_parts(self) -> (I, C) {
        (self.input, self.camera)
    }
}

impl<I, C> StateObserver for TransitionBridge<I, C>
where
    I: InputMapSelector,
    C: CameraModeSelector,
{
    fn on_event(&mut self, event: &StateEvent) {
        let StateEvent::Entered {
            path,
            input_map,
            camera,
        } = event
        else {
            return;
        };

        if let Some(map) = input_map {
            tracing::debug!("Input map -> {} (entered '{}')", map, path);
            self.input.select_input_map(*map);
        }

        if let Some(mode) = camera {
            tracing::debug!("Camera mode -> {} (entered '{}')", mode, path);
            self.camera.select_camera_mode(*mode);
        }
    }
}
