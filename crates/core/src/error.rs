//! Error types for board construction and session calls.
//!
//! A rejected drop is not an error; see [`crate::session::PlacementOutcome`].

use thiserror::Error;

use crate::types::{PieceId, SlotId};

/// Invalid configuration, detected before any turn runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board mismatch: width x height is {expected} but {actual} slot positions were given")]
    BoardMismatch { expected: usize, actual: usize },
    #[error("shape catalog is empty")]
    EmptyCatalog,
    #[error("shape {index} has no squares")]
    EmptyShape { index: usize },
    #[error("spawn count must be between 1 and {max}, got {got}")]
    NoSpawns { got: usize, max: usize },
    #[error("matching tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f32),
    #[error("colour palette is empty")]
    EmptyPalette,
    #[error("invalid config json: {0}")]
    Json(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::BoardMismatch { .. } => "board_mismatch",
            ConfigError::EmptyCatalog | ConfigError::EmptyShape { .. } => "invalid_catalog",
            ConfigError::NoSpawns { .. } => "invalid_spawns",
            ConfigError::InvalidTolerance(_) => "invalid_tolerance",
            ConfigError::EmptyPalette => "invalid_palette",
            ConfigError::Json(_) => "invalid_json",
        }
    }
}

/// Misuse of a running session. All checks happen before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the game is over")]
    SessionEnded,
    #[error("{0} is not an active piece")]
    UnknownPiece(PieceId),
    #[error("{0} cannot be placed on the current board")]
    PieceNotPlaceable(PieceId),
    #[error("expected {expected} square positions, got {got}")]
    SquareCountMismatch { expected: usize, got: usize },
    #[error("{0} does not exist on this board")]
    UnknownSlot(SlotId),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::SessionEnded => "session_ended",
            SessionError::UnknownPiece(_) => "unknown_piece",
            SessionError::PieceNotPlaceable(_) => "not_placeable",
            SessionError::SquareCountMismatch { .. } | SessionError::UnknownSlot(_) => {
                "invalid_place"
            }
        }
    }
}
