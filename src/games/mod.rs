//! Game implementations built on the core engine.

pub mod chain_reaction;
