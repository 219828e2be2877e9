//! Checkpoint error types.

use crate::tree::NavigationError;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint does not fit the forest it is restored into
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to restore active state: {0}")]
    Restore(#[from] NavigationError),
}
