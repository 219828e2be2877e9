//! Save and resume the active state of a forest.
//!
//! A checkpoint holds the active path and the transition history, never
//! hooks or observers. Restoring navigates the forest back to the saved
//! path, so hooks and observers run exactly as for a live transition.

use crate::core::{StateHistory, StatePath};
use crate::tree::{StateForest, TransitionOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a forest's position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Active leaf path, `None` if no root was active
    pub active_path: Option<StatePath>,

    pub history: StateHistory,
}

impl ForestCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl StateForest {
    /// Snapshot the active path and history.
    pub fn checkpoint(&self) -> ForestCheckpoint {
        ForestCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            active_path: self.current_path(),
            history: self.history().clone(),
        }
    }

    /// Navigate back to the checkpoint's active path and adopt its history.
    ///
    /// The saved path must name an existing state; it becomes the active
    /// leaf, so any deeper child active under it is exited. A checkpoint
    /// without an active path only restores history.
    pub fn restore(&mut self, checkpoint: &ForestCheckpoint) -> Result<TransitionOutcome, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let mut outcome = TransitionOutcome::Unchanged;
        if let Some(path) = &checkpoint.active_path {
            let target = self.find_path(path).ok_or_else(|| {
                CheckpointError::ValidationFailed(format!("state '{}' does not exist", path))
            })?;

            if self.switch_to_path(path)?.is_switched() {
                outcome = TransitionOutcome::Switched;
            }
            if self.exit_current_sub_state(target)?.is_switched() {
                outcome = TransitionOutcome::Switched;
            }
        }

        self.replace_history(checkpoint.history.clone());
        tracing::info!(
            "Restored checkpoint {} at '{}'",
            checkpoint.id,
            self.current_state_path()
        );
        Ok(outcome)
    }
}
