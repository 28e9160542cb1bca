//! Rules engine trait and snapshot sinks.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each game state
//! - How moves modify state
//! - Win conditions
//!
//! `SnapshotSink` is how intermediate boards reach a presentation layer.

pub mod engine;
pub mod sink;

pub use engine::{RulesEngine, Transition};
pub use sink::{FnSink, NoopSink, SnapshotSink};
