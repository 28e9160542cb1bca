//! Board model: grid state, critical mass, placement and the cascade step.
//!
//! Everything in this module is a pure function of board values. The board
//! never sees turn order or the winner; that lives in `rules`.

mod cascade;
mod cell;
mod grid;

pub use cascade::{resolve, resolve_until, CascadeStep, ExplosionQueue, QueueOrder, Resolution, StepOutcome};
pub use cell::{Cell, Coord};
pub use grid::{Board, BoardError, Neighbors};
