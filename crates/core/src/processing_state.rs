//! Per-(action, person) processing state.
//!
//! Stored as an integer in `action_target_people.state`. The external engine
//! moves rows queued -> processed -> successful/failed on its own schedule.

use serde::{Deserialize, Serialize};

pub const STATE_QUEUED: i32 = 1;
pub const STATE_PROCESSED: i32 = 2;
pub const STATE_SUCCESSFUL: i32 = 3;
pub const STATE_FAILED: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    Queued,
    Processed,
    Successful,
    Failed,
}

impl ProcessingState {
    pub const ALL: [ProcessingState; 4] = [
        ProcessingState::Queued,
        ProcessingState::Processed,
        ProcessingState::Successful,
        ProcessingState::Failed,
    ];

    /// Convert from the stored integer. Returns `None` for out-of-range values.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            STATE_QUEUED => Some(Self::Queued),
            STATE_PROCESSED => Some(Self::Processed),
            STATE_SUCCESSFUL => Some(Self::Successful),
            STATE_FAILED => Some(Self::Failed),
            _ => None,
        }
    }

    /// The stored integer value.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Queued => STATE_QUEUED,
            Self::Processed => STATE_PROCESSED,
            Self::Successful => STATE_SUCCESSFUL,
            Self::Failed => STATE_FAILED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processed => "processed",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }
}
