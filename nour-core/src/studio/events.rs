use serde::{Deserialize, Serialize};
use strum::Display;

use crate::studio::result::GenerationResult;

/// Where a generation attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Refining,
    Synthesizing,
    Decoding,
    Encoding,
    Ready,
    Failed,
}

impl GenerationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationState::Ready | GenerationState::Failed)
    }
}

/// `StudioEvent`s are the studio's output. Every attempt emits a run of
/// `StateChanged` and ends with either `ResultReady` or `Failed`. Events of
/// overlapping attempts interleave; `attempt` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum StudioEvent {
    StateChanged {
        attempt: u64,
        state: GenerationState,
    },
    ResultReady {
        attempt: u64,
        result: GenerationResult,
    },
    Failed {
        attempt: u64,
        message: String,
    },
    /// The current result was dropped and its audio revoked.
    Discarded {
        id: uuid::Uuid,
    },
}
