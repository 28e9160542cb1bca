//! Chain Reaction.
//!
//! - Players take turns placing one orb in an empty cell or a cell they own
//! - A cell holding as many orbs as it has orthogonal neighbors explodes,
//!   sending one orb to each neighbor and capturing it
//! - Explosions chain until the board settles
//! - Once everyone has moved, a player who owns every orb on the board wins

mod engine;
mod game;

pub use engine::{Engine, MoveOutcome};
pub use game::ChainReaction;
