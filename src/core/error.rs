//! Error types for move handling and configuration.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::Coord;

/// Why a move was rejected as invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidMove {
    /// The coordinate lies outside the board.
    OutOfBounds { coord: Coord, rows: usize, cols: usize },
    /// The target cell belongs to another player.
    OpponentCell { coord: Coord, owner: PlayerId },
}

impl std::fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMove::OutOfBounds { coord, rows, cols } => {
                write!(f, "{} is outside the {}x{} board", coord, rows, cols)
            }
            InvalidMove::OpponentCell { coord, owner } => {
                write!(f, "{} is owned by {}", coord, owner)
            }
        }
    }
}

/// Errors returned when applying a move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move: {0}")]
    InvalidMove(InvalidMove),

    #[error("game is already over ({winner} won)")]
    GameAlreadyOver { winner: PlayerId },

    /// The cascade did not settle within the step limit. Indicates a broken
    /// board invariant, not a game outcome.
    #[error("cascade exceeded {limit} steps without settling")]
    CascadeOverflow { limit: usize },
}

impl MoveError {
    /// Recoverable errors leave the game untouched and the caller may retry
    /// with a different move.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MoveError::CascadeOverflow { .. })
    }
}

impl From<InvalidMove> for MoveError {
    fn from(reason: InvalidMove) -> Self {
        MoveError::InvalidMove(reason)
    }
}

/// Errors raised by `GameConfig::validate`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board must be at least 2x2, got {rows}x{cols}")]
    BoardTooSmall { rows: usize, cols: usize },

    #[error("player count must be between 2 and 8, got {0}")]
    PlayerCount(usize),

    #[error("{players} players need at least {players} cells, board has {cells}")]
    TooManyPlayers { players: usize, cells: usize },

    #[error("cascade step limit must be non-zero")]
    ZeroCascadeLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_display() {
        let err = MoveError::from(InvalidMove::OutOfBounds {
            coord: Coord::new(5, 1),
            rows: 5,
            cols: 5,
        });
        assert_eq!(err.to_string(), "invalid move: (5, 1) is outside the 5x5 board");

        let err = MoveError::from(InvalidMove::OpponentCell {
            coord: Coord::new(0, 0),
            owner: PlayerId::new(1),
        });
        assert_eq!(err.to_string(), "invalid move: (0, 0) is owned by Player 1");
    }

    #[test]
    fn test_recoverable() {
        assert!(MoveError::GameAlreadyOver { winner: PlayerId::new(0) }.is_recoverable());
        assert!(!MoveError::CascadeOverflow { limit: 10 }.is_recoverable());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::BoardTooSmall { rows: 1, cols: 4 }.to_string(),
            "board must be at least 2x2, got 1x4"
        );
        assert_eq!(
            ConfigError::PlayerCount(9).to_string(),
            "player count must be between 2 and 8, got 9"
        );
        assert_eq!(
            ConfigError::TooManyPlayers { players: 5, cells: 4 }.to_string(),
            "5 players need at least 5 cells, board has 4"
        );
    }
}
