//! Game configuration.
//!
//! The board dimensions and player count are fixed for the lifetime of a
//! game. `GameConfig` defaults to the classic 5x5 two-player setup; tests
//! and the terminal driver override fields through the `with_*` builders.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default board height.
pub const DEFAULT_ROWS: usize = 5;

/// Default board width.
pub const DEFAULT_COLS: usize = 5;

/// Default number of players.
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// Cascade steps allowed per board cell before resolution is aborted.
pub const CASCADE_STEPS_PER_CELL: usize = 256;

/// Supported player counts.
pub const PLAYER_COUNT_RANGE: std::ops::RangeInclusive<usize> = 2..=8;

/// Complete configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board height.
    pub rows: usize,

    /// Board width.
    pub cols: usize,

    /// Number of players taking turns.
    pub player_count: usize,

    /// Hard cap on cascade steps per move. Exceeding it is reported as
    /// `MoveError::CascadeOverflow`.
    pub max_cascade_steps: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl GameConfig {
    /// Create a two-player configuration for a `rows` x `cols` board.
    ///
    /// The cascade limit scales with the number of cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            player_count: DEFAULT_PLAYER_COUNT,
            max_cascade_steps: rows * cols * CASCADE_STEPS_PER_CELL,
        }
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the cascade step limit.
    #[must_use]
    pub fn with_max_cascade_steps(mut self, limit: usize) -> Self {
        self.max_cascade_steps = limit;
        self
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !PLAYER_COUNT_RANGE.contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        // Until everyone has moved there are fewer orbs than players, so
        // this leaves an empty cell for every opening move.
        if self.cell_count() < self.player_count {
            return Err(ConfigError::TooManyPlayers {
                players: self.player_count,
                cells: self.cell_count(),
            });
        }
        if self.max_cascade_steps == 0 {
            return Err(ConfigError::ZeroCascadeLimit);
        }
        Ok(())
    }
}
