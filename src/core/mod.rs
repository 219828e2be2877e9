//! Core value types.
//!
//! This module contains the pure pieces of the state machine:
//! - State paths and their string addressing format
//! - Structural tags consumed by the transition bridge
//! - Guards and per-node transition policies
//! - Transition history
//!
//! Nothing in here touches the node tree or performs side effects.

mod guard;
mod history;
mod path;
mod policy;
mod tags;

pub use guard::{Guard, TransitionRequest};
pub use history::{StateHistory, StateTransition};
pub use path::{StatePath, DEFAULT_SEPARATOR};
pub use policy::TransitionPolicy;
pub use tags::{CameraMode, InputMap, NodeTags};
