//! Generation errors
//!
//! Only budget exhaustion and bad parameters surface to the caller. Local
//! conditions such as a walk that finds nothing to join are recovered silently.

use thiserror::Error;

use crate::dungeon::{CorridorId, RoomId};

/// Errors that abort (or abandon part of) a generation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("no space for room {room} ({width}x{height}) after {attempts} attempts")]
    NoSpaceForRoom {
        room: RoomId,
        width: i32,
        height: i32,
        attempts: u32,
    },

    #[error("corridor {corridor} from {origin} to {target} exceeded {steps} steps")]
    CorridorStepOverflow {
        corridor: CorridorId,
        origin: RoomId,
        target: RoomId,
        steps: u32,
    },

    #[error("connection phase stalled with {sets} sets left after {iterations} iterations")]
    ConnectivityStalled { sets: usize, iterations: u32 },

    #[error("invalid generation parameters: {0}")]
    InvalidParams(String),
}

impl GenError {
    /// Whether retrying with different parameters (or another seed) may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenError::NoSpaceForRoom { .. }
                | GenError::CorridorStepOverflow { .. }
                | GenError::ConnectivityStalled { .. }
        )
    }
}

/// Errors raised while loading generation parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] GenError),
}
