//! The board grid.
//!
//! `Board` is a value type: every mutating operation returns a new board and
//! leaves the receiver untouched. The cells live in an `im::Vector`, so a
//! copy shares structure with its source and cloning is O(1), one per
//! cascade frame.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::{Cell, Coord};
use crate::core::{GameConfig, PlayerId, PlayerMap};

/// In-bounds orthogonal neighbors of a cell. Never more than four.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// Why serialized board data was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("a {rows}x{cols} board cannot hold {cells} cells")]
    Shape { rows: usize, cols: usize, cells: usize },

    #[error("cell {coord} has an owner iff it has orbs, got {count} orbs")]
    Ownership { coord: Coord, count: u32 },
}

/// Board data as it appears on the wire, before validation.
#[derive(Deserialize)]
struct RawBoard {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, BoardError> {
        if raw.cells.len() != raw.rows * raw.cols {
            return Err(BoardError::Shape {
                rows: raw.rows,
                cols: raw.cols,
                cells: raw.cells.len(),
            });
        }
        let board = Board {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        };
        if let Some((coord, cell)) = board
            .iter()
            .find(|(_, cell)| cell.owner().is_none() != cell.is_empty())
        {
            return Err(BoardError::Ownership {
                coord,
                count: cell.count(),
            });
        }
        Ok(board)
    }
}

/// Rectangular grid of cells with fixed dimensions.
///
/// Deserialization checks the cell count against the dimensions and the
/// owner/orb invariant of every cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
}

impl Board {
    /// Create an empty `rows` x `cols` board.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: std::iter::repeat(Cell::EMPTY).take(rows * cols).collect(),
        }
    }

    /// Create an empty board sized by `config`.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.rows, config.cols)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `coord` lies on the board.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.contains(coord), "{} outside board", coord);
        coord.row * self.cols + coord.col
    }

    /// The cell at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds. Use [`Board::get`] for a checked
    /// lookup.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[self.index(coord)]
    }

    /// The cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.contains(coord).then(|| self.cell(coord))
    }

    /// Iterate over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / cols, i % cols), *cell))
    }

    /// In-bounds orthogonal neighbors, ordered right, down, left, up.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Neighbors {
        let Coord { row, col } = coord;
        let mut out = Neighbors::new();
        if col + 1 < self.cols {
            out.push(Coord::new(row, col + 1));
        }
        if row + 1 < self.rows {
            out.push(Coord::new(row + 1, col));
        }
        if col > 0 {
            out.push(Coord::new(row, col - 1));
        }
        if row > 0 {
            out.push(Coord::new(row - 1, col));
        }
        out
    }

    /// Orb count at which the cell at `coord` explodes: its number of
    /// in-bounds orthogonal neighbors.
    #[must_use]
    pub fn critical_mass(&self, coord: Coord) -> usize {
        let Coord { row, col } = coord;
        usize::from(row > 0)
            + usize::from(row + 1 < self.rows)
            + usize::from(col > 0)
            + usize::from(col + 1 < self.cols)
    }

    /// Whether the cell at `coord` has reached critical mass.
    #[must_use]
    pub fn is_critical(&self, coord: Coord) -> bool {
        self.cell(coord).count() as usize >= self.critical_mass(coord)
    }

    /// Whether every cell is below critical mass.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.iter()
            .all(|(coord, cell)| (cell.count() as usize) < self.critical_mass(coord))
    }

    /// A copy of this board with `cell` at `coord`.
    #[must_use]
    pub fn with_cell(&self, coord: Coord, cell: Cell) -> Self {
        let mut next = self.clone();
        next.set(coord, cell);
        next
    }

    /// A copy of this board with one more orb at `coord`, owned by `player`.
    ///
    /// No ownership check is made here: rejecting opponent cells is the
    /// rules engine's job.
    #[must_use]
    pub fn place_orb(&self, coord: Coord, player: PlayerId) -> Self {
        let cell = self.cell(coord).with_orb(player);
        self.with_cell(coord, cell)
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        let index = self.index(coord);
        self.cells.set(index, cell);
    }

    // === Tallies ===

    /// Total orbs on the board.
    #[must_use]
    pub fn total_orbs(&self) -> u64 {
        self.cells.iter().map(|cell| u64::from(cell.count())).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Orbs held by each player.
    #[must_use]
    pub fn orbs_by_player(&self, player_count: usize) -> PlayerMap<u64> {
        let mut tally = PlayerMap::with_value(player_count, 0);
        for cell in self.cells.iter() {
            if let Some(owner) = cell.owner() {
                tally[owner] += u64::from(cell.count());
            }
        }
        tally
    }

    /// Cells owned by each player.
    #[must_use]
    pub fn cells_by_player(&self, player_count: usize) -> PlayerMap<usize> {
        let mut tally = PlayerMap::with_value(player_count, 0);
        for owner in self.cells.iter().filter_map(Cell::owner) {
            tally[owner] += 1;
        }
        tally
    }

    /// Distinct owners of occupied cells.
    #[must_use]
    pub fn owners(&self) -> FxHashSet<PlayerId> {
        self.cells.iter().filter_map(Cell::owner).collect()
    }

    /// The only player with orbs on the board, if exactly one has any.
    #[must_use]
    pub fn sole_owner(&self) -> Option<PlayerId> {
        let owners = self.owners();
        if owners.len() == 1 {
            owners.into_iter().next()
        } else {
            None
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>3}", self.cell(Coord::new(row, col)).to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
