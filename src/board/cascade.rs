//! Explosion cascade.
//!
//! A cascade is resolved with an explicit worklist of coordinates rather
//! than recursion. Each step pops one entry, rechecks it against the current
//! board, and either discards it as stale or explodes it:
//!
//! 1. The cell is reset to empty.
//! 2. Every in-bounds orthogonal neighbor gains one orb and is captured by
//!    the acting player, whoever owned it before.
//! 3. Neighbors that reach critical mass are queued. A coordinate may be
//!    queued more than once; the recheck absorbs the duplicates.
//!
//! An exploding cell is emptied completely, so orbs it holds beyond critical
//! mass leave the board. As long as no cell explodes with such a surplus,
//! the settled board does not depend on processing order and `QueueOrder`
//! only changes the sequence of intermediate frames.
//!
//! [`resolve_until`] can cut a cascade short once a caller-supplied
//! predicate holds; the board it returns may then still hold critical cells.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use super::cell::{Cell, Coord};
use super::grid::{Board, Neighbors};
use crate::core::{MoveError, PlayerId};

/// Which pending explosion is processed next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueOrder {
    /// First discovered, first resolved.
    #[default]
    Fifo,
    /// Most recently discovered first.
    Lifo,
}

/// Pending explosions for one move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionQueue {
    pending: Vector<Coord>,
    order: QueueOrder,
}

impl ExplosionQueue {
    /// Create an empty FIFO queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with the given processing order.
    #[must_use]
    pub fn with_order(order: QueueOrder) -> Self {
        Self {
            pending: Vector::new(),
            order,
        }
    }

    /// The initial queue after an orb lands on `coord`: just `coord` if it
    /// reached critical mass, otherwise empty.
    #[must_use]
    pub fn after_placement(board: &Board, coord: Coord, order: QueueOrder) -> Self {
        let mut queue = Self::with_order(order);
        if board.is_critical(coord) {
            queue.push(coord);
        }
        queue
    }

    pub fn push(&mut self, coord: Coord) {
        self.pending.push_back(coord);
    }

    /// Remove the next entry according to the queue's order.
    pub fn pop(&mut self) -> Option<Coord> {
        match self.order {
            QueueOrder::Fifo => self.pending.pop_front(),
            QueueOrder::Lifo => self.pending.pop_back(),
        }
    }

    #[must_use]
    pub fn order(&self) -> QueueOrder {
        self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over pending entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.pending.iter()
    }
}

/// What a single cascade step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The queue was empty; nothing happened.
    Idle,
    /// The entry was below critical mass by the time it was dequeued.
    Stale(Coord),
    /// The cell exploded.
    Exploded {
        origin: Coord,
        /// Orbs held beyond critical mass. They leave the board.
        surplus: u32,
        /// Neighbors that received an orb, in distribution order.
        captured: Neighbors,
    },
}

/// Result of [`Board::cascade_step`].
#[derive(Clone, Debug)]
pub struct CascadeStep {
    /// Board after the step.
    pub board: Board,

    /// Queue after the step.
    pub queue: ExplosionQueue,

    pub outcome: StepOutcome,

    /// Intermediate boards for animation: one after the reset, then one
    /// after each neighbor increment. Empty unless the cell exploded.
    pub frames: Vec<Board>,
}

impl CascadeStep {
    #[must_use]
    pub fn exploded(&self) -> bool {
        matches!(self.outcome, StepOutcome::Exploded { .. })
    }
}

impl Board {
    /// Process exactly one pending explosion.
    ///
    /// Pure: `self` and `queue` are left untouched, and the updated board
    /// and queue are returned in the [`CascadeStep`].
    #[must_use]
    pub fn cascade_step(&self, queue: &ExplosionQueue, acting_player: PlayerId) -> CascadeStep {
        let mut queue = queue.clone();
        let Some(origin) = queue.pop() else {
            return CascadeStep {
                board: self.clone(),
                queue,
                outcome: StepOutcome::Idle,
                frames: Vec::new(),
            };
        };

        let critical = self.critical_mass(origin);
        let count = self.cell(origin).count();
        if (count as usize) < critical {
            trace!(%origin, count, critical, "discarding stale explosion");
            return CascadeStep {
                board: self.clone(),
                queue,
                outcome: StepOutcome::Stale(origin),
                frames: Vec::new(),
            };
        }

        let mut board = self.clone();
        let mut frames = Vec::with_capacity(critical + 1);
        board.set(origin, Cell::EMPTY);
        frames.push(board.clone());

        let captured = board.neighbors(origin);
        for &neighbor in &captured {
            let cell = board.cell(neighbor).with_orb(acting_player);
            board.set(neighbor, cell);
            frames.push(board.clone());

            if cell.count() as usize >= board.critical_mass(neighbor) {
                queue.push(neighbor);
            }
        }

        trace!(%origin, count, pending = queue.len(), "cell exploded");

        CascadeStep {
            board,
            queue,
            outcome: StepOutcome::Exploded {
                origin,
                surplus: count - critical as u32,
                captured,
            },
            frames,
        }
    }
}

/// Summary of a resolved cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The final board. Stable unless `decided` is set.
    pub board: Board,

    /// Cells that exploded.
    pub explosions: usize,

    /// Surplus orbs removed by explosions of over-full cells.
    pub orbs_lost: u64,

    /// Queue entries processed, stale ones included.
    pub steps: usize,

    /// Resolution stopped early because the outcome was already decided.
    /// Explosions still pending at that point were dropped.
    pub decided: bool,
}

/// Drive cascade steps from `queue` until it is empty.
///
/// `on_frame` receives every intermediate board in order. Fails with
/// [`MoveError::CascadeOverflow`] once `max_steps` entries have been
/// processed and work is still pending; the partially resolved board is
/// discarded.
pub fn resolve(
    board: Board,
    queue: ExplosionQueue,
    acting_player: PlayerId,
    max_steps: usize,
    on_frame: impl FnMut(&Board),
) -> Result<Resolution, MoveError> {
    resolve_until(board, queue, acting_player, max_steps, |_| false, on_frame)
}

/// Like [`resolve`], but stops as soon as `decided` holds for the current
/// board, before processing the next pending entry.
///
/// A saturated board can keep exploding forever after one player has taken
/// every cell.
pub fn resolve_until(
    board: Board,
    queue: ExplosionQueue,
    acting_player: PlayerId,
    max_steps: usize,
    decided: impl Fn(&Board) -> bool,
    mut on_frame: impl FnMut(&Board),
) -> Result<Resolution, MoveError> {
    let mut board = board;
    let mut queue = queue;
    let mut explosions = 0;
    let mut orbs_lost = 0;
    let mut steps = 0;

    while !queue.is_empty() {
        if decided(&board) {
            debug!(steps, pending = queue.len(), "outcome decided, dropping pending explosions");
            return Ok(Resolution {
                board,
                explosions,
                orbs_lost,
                steps,
                decided: true,
            });
        }
        if steps >= max_steps {
            error!(
                limit = max_steps,
                pending = queue.len(),
                "cascade did not settle, aborting move"
            );
            return Err(MoveError::CascadeOverflow { limit: max_steps });
        }

        let step = board.cascade_step(&queue, acting_player);
        steps += 1;
        if let StepOutcome::Exploded { surplus, .. } = &step.outcome {
            explosions += 1;
            orbs_lost += u64::from(*surplus);
        }
        for frame in &step.frames {
            on_frame(frame);
        }

        board = step.board;
        queue = step.queue;
    }

    Ok(Resolution {
        board,
        explosions,
        orbs_lost,
        steps,
        decided: false,
    })
}
