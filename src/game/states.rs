//! Names of the game's states.

use crate::core::StatePath;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub const MAIN_MENU: &str = "MainMenu";
pub const INSIDE_GAME: &str = "InsideGame";

pub const OUTSIDE_WORLD: &str = "OutsideWorld";
pub const MOUNTAIN_FOOT: &str = "MountainFoot";
pub const CLIMBING: &str = "Climbing";
pub const PERCEPTION: &str = "Perception";
pub const MOUNTAIN_TOP: &str = "MountainTop";

pub const INSIDE_WORLD: &str = "InsideWorld";
pub const SAILING: &str = "Sailing";
pub const INTERACTION: &str = "Interaction";
pub const THOUGHT_BOAT_CABIN: &str = "ThoughtBoatCabin";
pub const TELESCOPE: &str = "Telescope";

pub const EXPLORING_MIND: &str = "ExploringMind";
pub const RESTING: &str = "Resting";

/// Leaves during which game time progresses.
pub const TIMED_STATES: [&str; 3] = [CLIMBING, SAILING, EXPLORING_MIND];

/// What the player is doing while in the `Interaction` state.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum InteractionKind {
    /// Loading or unloading cargo
    Cargo,
    /// Steering at the helm
    Helm,
    /// Tying up or casting off
    Mooring,
}

pub fn outside_world() -> StatePath {
    StatePath::from_segments([INSIDE_GAME, OUTSIDE_WORLD])
}

pub fn inside_world() -> StatePath {
    StatePath::from_segments([INSIDE_GAME, INSIDE_WORLD])
}

pub fn sailing() -> StatePath {
    inside_world().child(SAILING)
}
