//! The game's concrete state hierarchy.
//!
//! ```text
//! MainMenu
//! InsideGame
//! ├── OutsideWorld: MountainFoot, Climbing, Perception, MountainTop
//! └── InsideWorld
//!     ├── Sailing
//!     ├── Interaction: Cargo, Helm, Mooring
//!     ├── ThoughtBoatCabin: ExploringMind, Resting
//!     └── Telescope
//! ```
//!
//! [`GameStateSystem`] owns the forest built from this tree. Input maps and
//! camera modes are attached as node tags and reach the host through a
//! [`crate::events::TransitionBridge`].

mod error;
mod states;
mod system;
mod tree;

pub use error::GameError;
pub use states::*;
pub use system::{game_time_advances, GameStateSystem};
pub use tree::{game_builder, game_roots};
