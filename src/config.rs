//! Forest configuration and loaders.
use crate::core::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Root entered by [`crate::game::GameStateSystem::initialize`] when nothing else is configured.
pub const DEFAULT_INITIAL_ROOT: &str = "MainMenu";

/// Errors raised when a deserialized configuration breaks its rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Separator {0:?} must not be alphanumeric")]
    AlphanumericSeparator(char),
}

/// Tunables shared by the forest and the game facade.
///
/// Deserialization applies the same rules as [`ForestConfig::from_env`]:
/// the history limit is at least 1 and the separator is not alphanumeric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForestConfig")]
pub struct ForestConfig {
    /// Separator used when parsing and printing state paths
    pub separator: char,
    /// Maximum number of transitions kept in the history
    pub history_limit: usize,
    /// Root entered on initialization
    pub initial_root: String,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            history_limit: 256,
            initial_root: DEFAULT_INITIAL_ROOT.to_string(),
        }
    }
}

impl ForestConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STATETREE_SEPARATOR` - Path separator, a single character (default: `/`)
    /// - `STATETREE_HISTORY_LIMIT` - Transitions kept in history (default: 256)
    /// - `STATETREE_INITIAL_ROOT` - Root entered on start-up (default: `MainMenu`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(separator) = read_env::<char>("STATETREE_SEPARATOR") {
            match check_separator(separator) {
                Ok(separator) => config.separator = separator,
                Err(e) => tracing::warn!("Ignoring STATETREE_SEPARATOR: {}", e),
            }
        }

        if let Some(limit) = read_env::<usize>("STATETREE_HISTORY_LIMIT") {
            config.history_limit = limit.max(1);
        }

        if let Ok(root) = env::var("STATETREE_INITIAL_ROOT") {
            if !root.trim().is_empty() {
                config.initial_root = root.trim().to_string();
            }
        }

        config
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn with_initial_root(mut self, root: impl Into<String>) -> Self {
        self.initial_root = root.into();
        self
    }
}

/// Wire form of [`ForestConfig`]; missing fields take their defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawForestConfig {
    separator: char,
    history_limit: usize,
    initial_root: String,
}

impl Default for RawForestConfig {
    fn default() -> Self {
        let defaults = ForestConfig::default();
        Self {
            separator: defaults.separator,
            history_limit: defaults.history_limit,
            initial_root: defaults.initial_root,
        }
    }
}

impl TryFrom<RawForestConfig> for ForestConfig {
    type Error = ConfigError;

    fn try_from(raw: RawForestConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            separator: check_separator(raw.separator)?,
            history_limit: raw.history_limit.max(1),
            initial_root: raw.initial_root,
        })
    }
}

fn check_separator(separator: char) -> Result<char, ConfigError> {
    if separator.is_alphanumeric() {
        Err(ConfigError::AlphanumericSeparator(separator))
    } else {
        Ok(separator)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
