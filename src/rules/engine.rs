//! Rules engine trait.
//!
//! The rules engine is a pure transition function over `GameState`:
//! - Which moves are legal
//! - How a move (and its cascade) changes the state
//! - When the game is over

use crate::board::Coord;
use crate::core::{GameConfig, GameState, MoveError, MoveRecord, PlayerId};

use super::sink::SnapshotSink;

/// A successful move: the successor state plus what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state after the cascade settled and the turn advanced.
    pub state: GameState,

    /// History entry for the move.
    pub record: MoveRecord,

    /// Queue entries processed during the cascade, stale ones included.
    pub cascade_steps: usize,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` must not modify its input state; rejected moves leave the
///   caller with exactly what it had.
/// - `apply_move` must be deterministic.
/// - `is_terminal`: return `None` while the game continues.
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Check whether the player to move may place an orb at `coord`.
    fn validate_move(&self, state: &GameState, coord: Coord) -> Result<(), MoveError>;

    /// Apply a move for `state.current_player`.
    ///
    /// Every intermediate snapshot is passed to `sink` before this returns.
    fn apply_move(
        &self,
        state: &GameState,
        coord: Coord,
        sink: &mut dyn SnapshotSink,
    ) -> Result<Transition, MoveError>;

    /// The winner, if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<PlayerId>;

    // === Convenience Methods ===

    /// Whether the player to move may place an orb at `coord`.
    fn is_legal(&self, state: &GameState, coord: Coord) -> bool {
        self.validate_move(state, coord).is_ok()
    }

    /// Enumerate every legal placement for the player to move, in row-major
    /// order. Empty once the game is over.
    fn legal_moves(&self, state: &GameState) -> Vec<Coord> {
        state
            .board
            .iter()
            .map(|(coord, _)| coord)
            .filter(|&coord| self.is_legal(state, coord))
            .collect()
    }
}
