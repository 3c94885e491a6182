//! Error types for move legality, game commands and configuration.

use thiserror::Error;

use crate::board::Color;
use crate::game::GamePhase;

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: point is off the board")]
    OutOfBounds,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: retakes ko")]
    Ko,
    #[error("illegal move: suicide")]
    Suicide,
}

/// A command the game engine refused. The game state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    IllegalMove(#[from] MoveError),
    #[error("cannot {operation} during the {phase} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: GamePhase,
    },
    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Color, got: Color },
    #[error("the engine is disabled")]
    EngineDisabled,
    #[error("it is not the engine's turn")]
    NotEngineTurn,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("komi must be a finite number, got {0}")]
    InvalidKomi(f64),
}
