//! The state hierarchy.
//!
//! - [`StateNode`]: one named node with its active/paused flags, its current
//!   child and its transition policy
//! - [`StateForest`]: the arena owning every root tree, the active root and
//!   all navigation
//! - [`StateNavigator`]: the narrow surface passed to other systems
//!
//! Navigation never panics on caller input. Refused requests are logged
//! through `tracing` and returned as [`NavigationError`].

mod error;
mod forest;
mod navigator;
mod node;

pub use error::{NavigationError, TransitionOutcome};
pub use forest::{StateForest, NO_STATE};
pub use navigator::StateNavigator;
pub use node::{HookContext, NodeId, StateHooks, StateNode};
