//! The game-facing facade over a [`StateForest`].

use super::error::GameError;
use super::states::*;
use super::tree::game_builder;
use crate::builder::ForestBuilder;
use crate::config::ForestConfig;
use crate::events::{
    CameraModeSelector, InputMapSelector, ObserverId, StateObserver, TransitionBridge,
};
use crate::tree::{NavigationError, StateForest, StateNavigator, TransitionOutcome};

/// True while game time progresses: climbing, sailing or exploring the mind.
pub fn game_time_advances(navigator: &impl StateNavigator) -> bool {
    TIMED_STATES.iter().any(|name| navigator.is_in_state(name))
}

/// Owns the game's forest and exposes gameplay-level transitions.
///
/// Built once at start-up and passed to the systems that need it.
///
/// # Example
///
/// ```
/// use statetree::config::ForestConfig;
/// use statetree::game::{GameStateSystem, InteractionKind};
///
/// let mut game = GameStateSystem::initialize(ForestConfig::default()).unwrap();
/// assert_eq!(game.current_state_path(), "MainMenu");
///
/// game.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
/// game.start_interaction(InteractionKind::Helm).unwrap();
/// assert_eq!(
///     game.current_state_path(),
///     "InsideGame/InsideWorld/Interaction/Helm"
/// );
/// ```
#[derive(Debug)]
pub struct GameStateSystem {
    forest: StateForest,
}

impl GameStateSystem {
    /// Build the game tree and enter `config.initial_root`.
    pub fn initialize(config: ForestConfig) -> Result<Self, GameError> {
        Self::from_builder(game_builder(config))
    }

    /// Like [`Self::initialize`], with a [`TransitionBridge`] subscribed
    /// before the initial root is entered.
    pub fn with_bridge<I, C>(config: ForestConfig, input: I, camera: C) -> Result<Self, GameError>
    where
        I: InputMapSelector + 'static,
        C: CameraModeSelector + 'static,
    {
        Self::from_builder(game_builder(config).observer(TransitionBridge::new(input, camera)))
    }

    /// Build from a prepared builder, typically [`super::game_builder`]
    /// with hooks attached.
    pub fn from_builder(builder: ForestBuilder) -> Result<Self, GameError> {
        let initial = builder.configuration().initial_root.clone();
        let mut forest = builder.build()?;
        forest.switch_to_root_state(&initial)?;
        tracing::info!("Game state system initialized at '{}'", initial);
        Ok(Self { forest })
    }

    pub fn forest(&self) -> &StateForest {
        &self.forest
    }

    pub fn forest_mut(&mut self) -> &mut StateForest {
        &mut self.forest
    }

    pub fn update(&mut self) {
        self.forest.update();
    }

    pub fn shutdown(&mut self) {
        self.forest.shutdown();
    }

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> ObserverId {
        self.forest.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.forest.unsubscribe(id)
    }

    pub fn switch_to_root_state(&mut self, name: &str) -> Result<TransitionOutcome, NavigationError> {
        self.forest.switch_to_root_state(name)
    }

    pub fn switch_to_state(&mut self, path: &str) -> Result<TransitionOutcome, NavigationError> {
        self.forest.switch_to_state(path)
    }

    pub fn switch_to_sub_state(&mut self, name: &str) -> Result<TransitionOutcome, NavigationError> {
        self.forest.switch_to_sub_state(name)
    }

    pub fn current_state_path(&self) -> String {
        self.forest.current_state_path()
    }

    pub fn is_in_state(&self, name: &str) -> bool {
        self.forest.is_in_state(name)
    }

    pub fn game_time_advances(&self) -> bool {
        game_time_advances(self)
    }

    // ------------------------------------------------------------------
    // Boat
    // ------------------------------------------------------------------

    /// Start working on part of the boat. Only possible while sailing.
    pub fn start_interaction(&mut self, kind: InteractionKind) -> Result<TransitionOutcome, NavigationError> {
        self.require_sailing()?;
        let path = inside_world().child(INTERACTION).child(kind.to_string());
        self.forest.switch_to_path(&path)
    }

    pub fn open_cabin(&mut self) -> Result<TransitionOutcome, NavigationError> {
        self.require_sailing()?;
        self.forest.switch_to_path(&inside_world().child(THOUGHT_BOAT_CABIN))
    }

    pub fn open_telescope(&mut self) -> Result<TransitionOutcome, NavigationError> {
        self.require_sailing()?;
        self.forest.switch_to_path(&inside_world().child(TELESCOPE))
    }

    /// Go back to sailing from any other boat state.
    pub fn return_to_sailing(&mut self) -> Result<TransitionOutcome, NavigationError> {
        if !self.forest.is_in_state(INSIDE_WORLD) {
            tracing::error!("Cannot return to sailing outside '{}'", INSIDE_WORLD);
            return Err(NavigationError::NotActive {
                name: INSIDE_WORLD.to_string(),
            });
        }
        self.forest.switch_to_path(&sailing())
    }

    fn require_sailing(&self) -> Result<(), NavigationError> {
        if self.forest.is_in_state(SAILING) {
            Ok(())
        } else {
            tracing::error!(
                "'{}' must be active, current state is '{}'",
                SAILING,
                self.forest.current_state_path()
            );
            Err(NavigationError::NotActive {
                name: SAILING.to_string(),
            })
        }
    }
}

impl StateNavigator for GameStateSystem {
    fn switch_to_state(&mut self, path: &str) -> Result<TransitionOutcome, NavigationError> {
        GameStateSystem::switch_to_state(self, path)
    }

    fn current_state_path(&self) -> String {
        GameStateSystem::current_state_path(self)
    }

    fn is_in_state(&self, name: &str) -> bool {
        GameStateSystem::is_in_state(self, name)
    }
}
