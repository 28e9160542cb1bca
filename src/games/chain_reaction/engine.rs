//! Owning game engine.
//!
//! `Engine` holds the rules and the current `GameState` and is the surface a
//! presentation layer talks to: forward cell selections, render the
//! snapshots that come back. Moves are transactional. The successor state is
//! computed from the current one and only committed once its cascade has
//! settled, so a rejected or aborted move leaves nothing behind.

use im::Vector;
use tracing::{debug, info, instrument, warn};

use super::game::ChainReaction;
use crate::board::Coord;
use crate::core::{
    ConfigError, GameConfig, GameState, MoveError, MoveRecord, Phase, PlayerId, Snapshot,
};
use crate::rules::{RulesEngine, SnapshotSink};

/// Result of an accepted move made through [`Engine::place_orb`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// History entry for the move.
    pub record: MoveRecord,

    /// Every intermediate snapshot, in the order they should be shown.
    pub snapshots: Vec<Snapshot>,

    /// Phase after the move.
    pub phase: Phase,
}

/// A single game in progress.
#[derive(Clone, Debug)]
pub struct Engine {
    rules: ChainReaction,
    state: GameState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_rules(ChainReaction::default())
    }
}

impl Engine {
    /// Start a game for `config`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_rules(ChainReaction::new(config)?))
    }

    /// Start a fresh game under `rules`.
    #[must_use]
    pub fn with_rules(rules: ChainReaction) -> Self {
        let state = rules.initial_state();
        info!(
            rows = state.board.rows(),
            cols = state.board.cols(),
            players = rules.config().player_count,
            "new game"
        );
        Self { rules, state }
    }

    /// Resume from an existing state.
    #[must_use]
    pub fn from_state(rules: ChainReaction, state: GameState) -> Self {
        Self { rules, state }
    }

    #[must_use]
    pub fn rules(&self) -> &ChainReaction {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.state.history
    }

    /// Cells the player to move may select.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.rules.legal_moves(&self.state)
    }

    /// Player intent from the presentation layer. Same as [`Engine::place_orb`].
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        self.place_orb(row, col)
    }

    /// Place an orb for the current player and resolve the cascade,
    /// collecting every intermediate snapshot.
    pub fn place_orb(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        let mut snapshots: Vec<Snapshot> = Vec::new();
        let record = self.place_orb_with(row, col, &mut snapshots)?;
        Ok(MoveOutcome {
            record,
            snapshots,
            phase: self.phase(),
        })
    }

    /// Place an orb for the current player, streaming snapshots to `sink`.
    ///
    /// On error the state is unchanged. Snapshots already emitted for an
    /// aborted cascade should be discarded by the sink's owner.
    #[instrument(level = "debug", skip(self, sink))]
    pub fn place_orb_with(
        &mut self,
        row: usize,
        col: usize,
        sink: &mut dyn SnapshotSink,
    ) -> Result<MoveRecord, MoveError> {
        let coord = Coord::new(row, col);
        let player = self.state.current_player;

        let transition = match self.rules.apply_move(&self.state, coord, sink) {
            Ok(transition) => transition,
            Err(err) => {
                if err.is_recoverable() {
                    warn!(%player, %coord, %err, "move rejected");
                }
                return Err(err);
            }
        };

        self.state = transition.state;
        match self.state.winner {
            Some(winner) => info!(%winner, turn = transition.record.turn, "game over"),
            None => debug!(
                %player,
                next = %self.state.current_player,
                explosions = transition.record.explosions,
                "move accepted"
            ),
        }

        Ok(transition.record)
    }

    /// Throw the current game away and start over with the same rules.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.state = self.rules.initial_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Cell};
    use crate::core::InvalidMove;
    use crate::rules::FnSink;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_engine_starts_awaiting_player_zero() {
        let engine = Engine::default();
        assert_eq!(engine.phase(), Phase::AwaitingMove(P0));
        assert_eq!(engine.legal_moves().len(), 25);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_new_validates_config() {
        assert!(matches!(
            Engine::new(GameConfig::new(0, 3)),
            Err(ConfigError::BoardTooSmall { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn test_place_orb_advances_turn() {
        let mut engine = Engine::default();

        let outcome = engine.place_orb(2, 2).unwrap();

        assert_eq!(outcome.phase, Phase::AwaitingMove(P1));
        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(outcome.record.turn, 1);
        assert_eq!(engine.current_player(), P1);
        assert_eq!(engine.state().board.cell(Coord::new(2, 2)), Cell::occupied(1, P0));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut engine = Engine::default();
        engine.place_orb(0, 0).unwrap();
        let before = engine.state().clone();

        let err = engine.select_cell(0, 0).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidMove(InvalidMove::OpponentCell {
                coord: Coord::new(0, 0),
                owner: P0,
            })
        );
        assert_eq!(engine.state(), &before);

        assert!(engine.place_orb(5, 0).is_err());
        assert_eq!(engine.current_player(), P1);
    }

    #[test]
    fn test_streaming_sink_sees_every_frame() {
        let board = Board::new(5, 5)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(3, 3), Cell::occupied(1, P1));
        let mut engine = Engine::from_state(
            ChainReaction::default(),
            GameState::from_board(board, P0, 2),
        );

        let mut totals = Vec::new();
        let record = engine
            .place_orb_with(0, 0, &mut FnSink(|s: &Snapshot| totals.push(s.board.total_orbs())))
            .unwrap();

        assert_eq!(record.explosions, 1);
        assert_eq!(totals, vec![3, 1, 2, 3]);
    }

    #[test]
    fn test_win_ends_game() {
        let board = Board::new(5, 5)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(0, 1), Cell::occupied(1, P1));
        let mut engine = Engine::from_state(
            ChainReaction::default(),
            GameState::from_board(board, P0, 2),
        );

        let outcome = engine.place_orb(0, 0).unwrap();

        assert_eq!(outcome.phase, Phase::GameOver(P0));
        assert_eq!(engine.winner(), Some(P0));
        // The turn does not pass once the game is won.
        assert_eq!(engine.current_player(), P0);
        assert_eq!(
            engine.place_orb(4, 4).unwrap_err(),
            MoveError::GameAlreadyOver { winner: P0 }
        );
        assert!(engine.legal_moves().is_empty());
    }

    #[test]
    fn test_restart() {
        let mut engine = Engine::default();
        engine.place_orb(1, 1).unwrap();
        engine.restart();

        assert!(engine.state().board.is_empty());
        assert_eq!(engine.current_player(), P0);
        assert!(engine.history().is_empty());
    }
}
