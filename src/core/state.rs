//! Game state.
//!
//! `GameState` is a value: the rules engine never edits one in place, it
//! builds the successor and hands it back. The board and the move history
//! are `im` persistent structures, so keeping the previous state around
//! (for rollback, or to diff against) costs O(1).
//!
//! ## Phases
//!
//! - `AwaitingMove(player)`: `player` may place an orb.
//! - `GameOver(winner)`: terminal; every move is rejected.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::config::GameConfig;
use super::player::PlayerId;
use crate::board::Board;

/// Where the game is in its state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMove(PlayerId),
    GameOver(PlayerId),
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current board contents.
    pub board: Board,

    /// Player whose turn it is. Unchanged once the game is over.
    pub current_player: PlayerId,

    /// Set once a single player owns every orb on the board.
    pub winner: Option<PlayerId>,

    /// Accepted moves so far.
    pub moves_played: u32,

    /// Accepted moves in order.
    pub history: Vector<MoveRecord>,
}

impl GameState {
    /// Fresh game: empty board, player 0 to move.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::from_board(Board::from_config(config), PlayerId::new(0), 0)
    }

    /// Start from an arbitrary position.
    ///
    /// `moves_played` matters for win detection, which only starts once
    /// every player has moved at least once.
    #[must_use]
    pub fn from_board(board: Board, current_player: PlayerId, moves_played: u32) -> Self {
        Self {
            board,
            current_player,
            winner: None,
            moves_played,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.winner {
            Some(winner) => Phase::GameOver(winner),
            None => Phase::AwaitingMove(self.current_player),
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Turn number of the next move (starts at 1).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.moves_played + 1
    }

    /// The most recent accepted move.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            winner: self.winner,
        }
    }
}

/// What a presentation layer renders: the board plus whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
}
