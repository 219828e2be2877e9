//! Statetree: a hierarchical state machine for game flow
//!
//! States form named trees. One root is active at a time, and within it a
//! chain of current children leads to the single active leaf. Transitions
//! run enter/exit/pause/resume hooks in a fixed order and are reported to
//! observers once they have completed.
//!
//! # Core Concepts
//!
//! - **Paths**: states are addressed as `Root/Child/Grandchild`
//! - **Policies**: each node decides which children it may switch to
//! - **Tags**: typed input-map and camera metadata, inherited down the tree
//! - **Events**: `Entered`/`Exited`/`Transition`, delivered to observers
//!
//! # Example
//!
//! ```rust
//! use statetree::builder::{ForestBuilder, StateSpec};
//! use statetree::tree::{NavigationError, TransitionOutcome};
//!
//! let mut forest = ForestBuilder::new()
//!     .root(StateSpec::new("MainMenu"))
//!     .root(
//!         StateSpec::new("InsideGame")
//!             .allow(["OutsideWorld"])
//!             .child(
//!                 StateSpec::new("OutsideWorld")
//!                     .children([StateSpec::new("MountainFoot"), StateSpec::new("Climbing")]),
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! forest.switch_to_root_state("MainMenu").unwrap();
//! let outcome = forest.switch_to_state("InsideGame/OutsideWorld/Climbing").unwrap();
//! assert_eq!(outcome, TransitionOutcome::Switched);
//! assert!(forest.is_in_state("OutsideWorld"));
//!
//! let err = forest.switch_to_state("InsideGame/OutsideWorld/Summit").unwrap_err();
//! assert!(matches!(err, NavigationError::StateNotFound { .. }));
//! assert_eq!(forest.current_state_path(), "InsideGame/OutsideWorld/Climbing");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod events;
pub mod game;
pub mod tree;

// Re-export commonly used types
pub use builder::{ForestBuilder, StateSpec};
pub use config::ForestConfig;
pub use core::{StatePath, TransitionPolicy};
pub use events::{StateEvent, StateObserver, TransitionBridge};
pub use tree::{NavigationError, StateForest, StateNavigator, TransitionOutcome};
