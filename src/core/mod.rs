//! Core types: players, configuration, errors, move records and game state.

pub mod player;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use config::GameConfig;
pub use error::{ConfigError, InvalidMove, MoveError};
pub use action::MoveRecord;
pub use state::{GameState, Phase, Snapshot};
