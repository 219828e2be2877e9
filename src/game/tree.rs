//! Declaration of the game's state trees.

use super::states::*;
use crate::builder::{ForestBuilder, StateSpec};
use crate::config::ForestConfig;
use crate::core::{CameraMode, InputMap};
use strum::IntoEnumIterator;

/// The two root trees: the main menu and the game world.
pub fn game_roots() -> Vec<StateSpec> {
    vec![
        StateSpec::new(MAIN_MENU).input_map(InputMap::MainTitle),
        StateSpec::new(INSIDE_GAME)
            .allow([OUTSIDE_WORLD, INSIDE_WORLD])
            .children([outside_world_spec(), inside_world_spec()]),
    ]
}

/// Builder preloaded with [`game_roots`], ready for hooks and observers.
pub fn game_builder(config: ForestConfig) -> ForestBuilder {
    ForestBuilder::new().config(config).roots(game_roots())
}

fn outside_world_spec() -> StateSpec {
    let climb = [MOUNTAIN_FOOT, CLIMBING, PERCEPTION, MOUNTAIN_TOP];
    StateSpec::new(OUTSIDE_WORLD)
        .allow(climb)
        .input_map(InputMap::OutsideWorld)
        .camera(CameraMode::OutsideWorld)
        .children(climb.map(StateSpec::new))
}

fn inside_world_spec() -> StateSpec {
    StateSpec::new(INSIDE_WORLD)
        .allow([SAILING, INTERACTION, THOUGHT_BOAT_CABIN, TELESCOPE])
        .input_map(InputMap::InsideWorld)
        .camera(CameraMode::InsideWorld)
        .children([
            StateSpec::new(SAILING).input_map(InputMap::InsideWorld),
            StateSpec::new(INTERACTION)
                .input_map(InputMap::BoatInteraction)
                .children(InteractionKind::iter().map(|kind| StateSpec::new(kind.to_string()))),
            StateSpec::new(THOUGHT_BOAT_CABIN)
                .input_map(InputMap::ThoughtVessel)
                .children([StateSpec::new(EXPLORING_MIND), StateSpec::new(RESTING)]),
            StateSpec::new(TELESCOPE).input_map(InputMap::Telescope),
        ])
}
