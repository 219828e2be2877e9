//! Structural tags carried by state nodes.
//!
//! Tags say which gameplay domain a subtree belongs to. They are resolved once,
//! when a node is attached to its parent, so consumers read a typed value
//! instead of searching the path string.

use serde::{Deserialize, Serialize};

/// Input action map that should be active while a subtree is entered.
///
/// The `Display` form is the action-map name expected by the input layer.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum InputMap {
    MainTitle,
    OutsideWorld,
    InsideWorld,
    BoatInteraction,
    ThoughtVessel,
    Telescope,
}

/// Camera rig selected while a subtree is entered.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum CameraMode {
    OutsideWorld,
    InsideWorld,
}

/// Tags attached to a node.
///
/// Each field inherits independently: a node that sets only `input_map` still
/// picks up its ancestor's `camera`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct NodeTags {
    pub input_map: Option<InputMap>,
    pub camera: Option<CameraMode>,
}

impl NodeTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_map(mut self, map: InputMap) -> Self {
        self.input_map = Some(map);
        self
    }

    pub fn with_camera(mut self, mode: CameraMode) -> Self {
        self.camera = Some(mode);
        self
    }

    /// Resolve against the parent's already-resolved tags.
    pub fn inherit(self, parent: &NodeTags) -> NodeTags {
        NodeTags {
            input_map: self.input_map.or(parent.input_map),
            camera: self.camera.or(parent.camera),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_map.is_none() && self.camera.is_none()
    }
}
