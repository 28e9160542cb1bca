//! Snapshot sinks.
//!
//! The rules engine pushes one [`Snapshot`] per visible change while a move
//! resolves. Sinks are called synchronously and in order; any pacing
//! between frames is the sink's business.

use crate::core::Snapshot;

pub trait SnapshotSink {
    /// Called for every intermediate snapshot of a move.
    fn emit(&mut self, snapshot: &Snapshot);
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl SnapshotSink for NoopSink {
    fn emit(&mut self, _snapshot: &Snapshot) {}
}

/// Collects every snapshot.
impl SnapshotSink for Vec<Snapshot> {
    fn emit(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&Snapshot)> SnapshotSink for FnSink<F> {
    fn emit(&mut self, snapshot: &Snapshot) {
        (self.0)(snapshot);
    }
}
