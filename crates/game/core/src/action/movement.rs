use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Reasons a move is rejected. A rejected move never mutates state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no game in progress")]
    NotPlaying,

    #[error("game is paused")]
    Paused,

    #[error("out of energy")]
    OutOfEnergy,

    #[error("destination {destination:?} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("step ({dx}, {dy}) is not a single orthogonal step")]
    InvalidStep { dx: i32, dy: i32 },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::NotPlaying | MoveError::Paused | MoveError::OutOfEnergy => {
                ErrorSeverity::Recoverable
            }
            MoveError::OutOfBounds { .. } | MoveError::InvalidStep { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::NotPlaying => "MOVE_NOT_PLAYING",
            MoveError::Paused => "MOVE_PAUSED",
            MoveError::OutOfEnergy => "MOVE_OUT_OF_ENERGY",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::InvalidStep { .. } => "MOVE_INVALID_STEP",
        }
    }
}
