//! Move history records.
//!
//! The only action in Chain Reaction is "place an orb at a coordinate", so a
//! move is fully described by its `Coord`. `MoveRecord` adds the metadata
//! kept in `GameState::history`.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::Coord;

/// An accepted move with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Presentation (move lists, "last move" highlighting)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// Where the orb was placed.
    pub coord: Coord,

    /// Turn number of the move (starts at 1).
    pub turn: u32,

    /// Number of cells that exploded during the cascade.
    pub explosions: usize,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: PlayerId, coord: Coord, turn: u32, explosions: usize) -> Self {
        Self {
            player,
            coord,
            turn,
            explosions,
        }
    }

    /// Whether the move set off at least one explosion.
    #[must_use]
    pub fn triggered_cascade(&self) -> bool {
        self.explosions > 0
    }
}
