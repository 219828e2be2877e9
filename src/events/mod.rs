//! Transition notifications and the collaborator bridge.
//!
//! # Key Concepts
//!
//! - **Events**: `Entered`, `Exited` and root-level `Transition` records
//! - **Observers**: anything implementing [`StateObserver`], closures included
//! - **Bridge**: an observer mapping node tags onto input and camera selectors
//!
//! Delivery is synchronous and single-threaded. The forest owns the observer
//! list and drains its event queue before returning from each public call.

mod bridge;
mod event;

pub use bridge::{CameraModeSelector, InputMapSelector, NoSelector, TransitionBridge};
pub use event::{ObserverId, StateEvent, StateObserver};
