use crate::builder::BuildError;
use crate::tree::NavigationError;
use thiserror::Error;

/// Errors raised while bringing up the game's state system.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Failed to build game states: {0}")]
    Build(#[from] BuildError),

    #[error("Failed to enter initial state: {0}")]
    Navigation(#[from] NavigationError),
}
