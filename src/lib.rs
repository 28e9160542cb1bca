//! # chain-reaction
//!
//! Rules engine for Chain Reaction, a turn-based territory game on a grid.
//!
//! ## Design Principles
//!
//! 1. **Value Semantics**: Boards and game states are values. Every move
//!    produces a new `GameState`; nothing is edited in place or shared
//!    mutably.
//!
//! 2. **Worklist Cascades**: Explosions are resolved with an explicit queue
//!    and a recheck on dequeue, never by recursion, under a hard step cap.
//!
//! 3. **Derived Winner**: The winner is recomputed from the board after
//!    every move.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The grid is an `im::Vector`, so each
//!   intermediate board of a cascade is an O(1) snapshot.
//!
//! - **Synchronous Snapshots**: The engine emits snapshots through a
//!   `SnapshotSink` as the cascade runs. It never sleeps; animation pacing
//!   belongs to the consumer.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, errors, move records, game state
//! - `board`: Grid, critical mass, placement and the cascade step
//! - `rules`: RulesEngine trait and snapshot sinks
//! - `games`: The Chain Reaction rules and the owning `Engine`
//!
//! ## Example
//!
//! ```
//! use chain_reaction::{Engine, Phase, PlayerId};
//!
//! let mut engine = Engine::default();
//! let outcome = engine.place_orb(2, 2).unwrap();
//!
//! assert_eq!(outcome.phase, Phase::AwaitingMove(PlayerId::new(1)));
//! assert_eq!(engine.state().board.total_orbs(), 1);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameConfig, ConfigError, InvalidMove, MoveError,
    MoveRecord, GameState, Phase, Snapshot,
};

pub use crate::board::{
    Board, BoardError, Cell, Coord,
    CascadeStep, ExplosionQueue, QueueOrder, Resolution, StepOutcome,
};

pub use crate::rules::{RulesEngine, Transition, SnapshotSink, NoopSink, FnSink};

pub use crate::games::chain_reaction::{ChainReaction, Engine, MoveOutcome};
