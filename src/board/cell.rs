//! Cells and coordinates.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A board coordinate, 0-based from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Contents of one board cell.
///
/// A cell is either empty and unowned, or holds at least one orb and has an
/// owner. The constructors keep that invariant; there is no upper bound on
/// the count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    count: u32,
    owner: Option<PlayerId>,
}

impl Cell {
    /// An empty, unowned cell.
    pub const EMPTY: Cell = Cell {
        count: 0,
        owner: None,
    };

    /// A cell holding `count` orbs of `owner`. A zero count yields `EMPTY`.
    #[must_use]
    pub fn occupied(count: u32, owner: PlayerId) -> Self {
        if count == 0 {
            Self::EMPTY
        } else {
            Self {
                count,
                owner: Some(owner),
            }
        }
    }

    /// Number of orbs in the cell.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Owning player, `None` when empty.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The same cell with one more orb, now owned by `player`.
    #[must_use]
    pub fn with_orb(self, player: PlayerId) -> Self {
        Self {
            count: self.count + 1,
            owner: Some(player),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{}{}", self.count, owner.letter()),
            None => write!(f, "."),
        }
    }
}
