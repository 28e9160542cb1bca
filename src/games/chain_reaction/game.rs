//! Chain Reaction rules.

use tracing::{debug, trace};

use crate::board::{resolve_until, Board, Coord, ExplosionQueue, QueueOrder};
use crate::core::{
    ConfigError, GameConfig, GameState, InvalidMove, MoveError, MoveRecord, PlayerId, Snapshot,
};
use crate::rules::{RulesEngine, SnapshotSink, Transition};

/// Chain Reaction rules for one board size and player count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainReaction {
    config: GameConfig,
    order: QueueOrder,
}

impl Default for ChainReaction {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            order: QueueOrder::Fifo,
        }
    }
}

impl ChainReaction {
    /// Create the rules for `config`, rejecting unplayable configurations.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            order: QueueOrder::Fifo,
        })
    }

    /// Process pending explosions in `order` instead of FIFO.
    ///
    /// Unless a cell explodes while over-full, the settled board is the same
    /// either way and only the snapshot sequence changes.
    #[must_use]
    pub fn with_order(mut self, order: QueueOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn order(&self) -> QueueOrder {
        self.order
    }

    /// A fresh game for these rules.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Win detection is armed once every player has had a turn. Before
    /// that, a lone owner just means the others have not moved yet.
    fn win_armed(&self, moves_played: u32) -> bool {
        moves_played as usize >= self.config.player_count
    }

    /// The seat after `mover` that still has a say in the game.
    ///
    /// Once everyone has moved, a player with no cells left is eliminated
    /// and loses their turns. Before that, rotation is strict.
    fn next_to_move(&self, state: &GameState, mover: PlayerId) -> PlayerId {
        let count = self.config.player_count;
        let next = mover.next(count);
        if !self.win_armed(state.moves_played) {
            return next;
        }

        let holders = state.board.owners();
        std::iter::successors(Some(next), |p| Some(p.next(count)))
            .take(count)
            .find(|p| {
                let alive = holders.contains(p);
                if !alive {
                    trace!(player = %p, "skipping eliminated player");
                }
                alive
            })
            .unwrap_or(next)
    }
}

impl RulesEngine for ChainReaction {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn validate_move(&self, state: &GameState, coord: Coord) -> Result<(), MoveError> {
        if let Some(winner) = state.winner {
            return Err(MoveError::GameAlreadyOver { winner });
        }

        let board = &state.board;
        let cell = board.get(coord).ok_or(InvalidMove::OutOfBounds {
            coord,
            rows: board.rows(),
            cols: board.cols(),
        })?;

        match cell.owner() {
            Some(owner) if owner != state.current_player => {
                Err(InvalidMove::OpponentCell { coord, owner }.into())
            }
            _ => Ok(()),
        }
    }

    fn apply_move(
        &self,
        state: &GameState,
        coord: Coord,
        sink: &mut dyn SnapshotSink,
    ) -> Result<Transition, MoveError> {
        self.validate_move(state, coord)?;

        let player = state.current_player;
        let frame = |board: &Board| Snapshot {
            board: board.clone(),
            current_player: player,
            winner: None,
        };

        let placed = state.board.place_orb(coord, player);
        sink.emit(&frame(&placed));

        // A saturated board never settles; stop once the mover owns it all.
        let armed = self.win_armed(state.moves_played + 1);
        let queue = ExplosionQueue::after_placement(&placed, coord, self.order);
        let resolution = resolve_until(
            placed,
            queue,
            player,
            self.config.max_cascade_steps,
            |board| armed && board.sole_owner() == Some(player),
            |board| sink.emit(&frame(board)),
        )?;

        debug!(
            %player,
            %coord,
            explosions = resolution.explosions,
            orbs_lost = resolution.orbs_lost,
            steps = resolution.steps,
            decided = resolution.decided,
            "cascade resolved"
        );

        let record = MoveRecord::new(player, coord, state.turn_number(), resolution.explosions);
        let mut history = state.history.clone();
        history.push_back(record);

        let mut next = GameState {
            board: resolution.board,
            current_player: player,
            winner: None,
            moves_played: state.moves_played + 1,
            history,
        };
        next.winner = self.is_terminal(&next);
        if next.winner.is_none() {
            next.current_player = self.next_to_move(&next, player);
        }

        Ok(Transition {
            state: next,
            record,
            cascade_steps: resolution.steps,
        })
    }

    fn is_terminal(&self, state: &GameState) -> Option<PlayerId> {
        if !self.win_armed(state.moves_played) {
            return None;
        }
        // An empty board has no owners, so it never produces a winner.
        state.board.sole_owner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::core::Phase;
    use crate::rules::NoopSink;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn rules() -> ChainReaction {
        ChainReaction::default()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = ChainReaction::new(GameConfig::default().with_players(1)).unwrap_err();
        assert_eq!(err, ConfigError::PlayerCount(1));
        assert!(ChainReaction::new(GameConfig::new(3, 4)).is_ok());
    }

    #[test]
    fn test_single_placement_no_explosion() {
        let rules = rules();
        let state = rules.initial_state();

        let t = rules.apply_move(&state, Coord::new(2, 2), &mut NoopSink).unwrap();

        assert_eq!(t.state.board.cell(Coord::new(2, 2)), Cell::occupied(1, P0));
        assert_eq!(t.state.winner, None);
        assert_eq!(t.state.current_player, P1);
        assert_eq!(t.state.moves_played, 1);
        assert_eq!(t.record, MoveRecord::new(P0, Coord::new(2, 2), 1, 0));
        assert_eq!(t.cascade_steps, 0);
        // Input untouched.
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_corner_explosion() {
        let rules = rules();
        let board = Board::new(5, 5)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(4, 4), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 2);

        let t = rules.apply_move(&state, Coord::new(0, 0), &mut NoopSink).unwrap();

        let b = &t.state.board;
        assert_eq!(b.cell(Coord::new(0, 0)), Cell::EMPTY);
        assert_eq!(b.cell(Coord::new(0, 1)), Cell::occupied(1, P0));
        assert_eq!(b.cell(Coord::new(1, 0)), Cell::occupied(1, P0));
        assert_eq!(b.total_orbs(), 3);
        assert_eq!(t.record.explosions, 1);
        assert_eq!(t.state.current_player, P1);
    }

    #[test]
    fn test_opponent_cell_rejected() {
        let rules = rules();
        let board = Board::new(5, 5).with_cell(Coord::new(1, 1), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 1);

        let err = rules.apply_move(&state, Coord::new(1, 1), &mut NoopSink).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidMove(InvalidMove::OpponentCell {
                coord: Coord::new(1, 1),
                owner: P1,
            })
        );
        assert!(!rules.is_legal(&state, Coord::new(1, 1)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let rules = rules();
        let state = rules.initial_state();

        let err = rules.validate_move(&state, Coord::new(0, 5)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::InvalidMove(InvalidMove::OutOfBounds { rows: 5, cols: 5, .. })
        ));
    }

    #[test]
    fn test_first_move_is_not_a_win() {
        let rules = rules();
        let t = rules
            .apply_move(&rules.initial_state(), Coord::new(0, 0), &mut NoopSink)
            .unwrap();
        assert_eq!(rules.is_terminal(&t.state), None);
        assert_eq!(t.state.phase(), Phase::AwaitingMove(P1));
    }

    #[test]
    fn test_empty_board_is_not_terminal() {
        let rules = rules();
        let state = GameState::from_board(Board::new(5, 5), P0, 10);
        assert_eq!(rules.is_terminal(&state), None);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let rules = rules();
        let board = Board::new(5, 5).with_cell(Coord::new(0, 0), Cell::occupied(1, P0));
        let mut state = GameState::from_board(board, P0, 4);
        state.winner = rules.is_terminal(&state);
        assert_eq!(state.winner, Some(P0));

        let err = rules.apply_move(&state, Coord::new(0, 0), &mut NoopSink).unwrap_err();
        assert_eq!(err, MoveError::GameAlreadyOver { winner: P0 });
        assert!(rules.legal_moves(&state).is_empty());
    }

    #[test]
    fn test_legal_moves_exclude_opponent_cells() {
        let rules = ChainReaction::new(GameConfig::new(2, 2)).unwrap();
        let board = Board::new(2, 2)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(1, 1), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 2);

        assert_eq!(
            rules.legal_moves(&state),
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 0)]
        );
    }

    #[test]
    fn test_snapshots_emitted_per_frame() {
        let rules = rules();
        let board = Board::new(5, 5)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(4, 4), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 2);

        let mut snapshots: Vec<Snapshot> = Vec::new();
        let t = rules.apply_move(&state, Coord::new(0, 0), &mut snapshots).unwrap();

        // Placement, reset, two neighbor increments.
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].board.cell(Coord::new(0, 0)).count(), 2);
        assert_eq!(snapshots[1].board.cell(Coord::new(0, 0)), Cell::EMPTY);
        assert!(snapshots.iter().all(|s| s.current_player == P0 && s.winner.is_none()));
        assert_eq!(snapshots[3].board, t.state.board);
    }

    #[test]
    fn test_cascade_overflow_leaves_input_state() {
        let rules = ChainReaction::new(GameConfig::default().with_max_cascade_steps(1)).unwrap();
        let board = Board::new(5, 5)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(0, 1), Cell::occupied(2, P0))
            .with_cell(Coord::new(4, 4), Cell::occupied(1, P1));
        let state = GameState::from_board(board.clone(), P0, 2);

        let err = rules.apply_move(&state, Coord::new(0, 0), &mut NoopSink).unwrap_err();
        assert_eq!(err, MoveError::CascadeOverflow { limit: 1 });
        assert!(!err.is_recoverable());
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_lifo_order_settles_to_same_board() {
        let board = Board::new(3, 3)
            .with_cell(Coord::new(1, 1), Cell::occupied(3, P0))
            .with_cell(Coord::new(0, 1), Cell::occupied(2, P1))
            .with_cell(Coord::new(1, 0), Cell::occupied(2, P1))
            .with_cell(Coord::new(2, 2), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 4);

        let rules = ChainReaction::new(GameConfig::new(3, 3)).unwrap();
        let fifo = rules.apply_move(&state, Coord::new(1, 1), &mut NoopSink).unwrap();
        let lifo = rules
            .clone()
            .with_order(QueueOrder::Lifo)
            .apply_move(&state, Coord::new(1, 1), &mut NoopSink)
            .unwrap();

        assert_eq!(fifo.state.board, lifo.state.board);
        assert_eq!(fifo.state.winner, lifo.state.winner);
    }

    #[test]
    fn test_winning_cascade_stops_on_saturated_board() {
        // Five orbs on a 2x2 board: the cascade would cycle without end.
        let board = Board::new(2, 2)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(0, 1), Cell::occupied(1, P0))
            .with_cell(Coord::new(1, 0), Cell::occupied(1, P0))
            .with_cell(Coord::new(1, 1), Cell::occupied(1, P1));
        let state = GameState::from_board(board, P0, 4);
        let rules = ChainReaction::new(GameConfig::new(2, 2)).unwrap();

        let mut snapshots: Vec<Snapshot> = Vec::new();
        let t = rules.apply_move(&state, Coord::new(0, 0), &mut snapshots).unwrap();

        assert_eq!(t.state.winner, Some(P0));
        assert_eq!(t.state.phase(), Phase::GameOver(P0));
        assert_eq!(t.record.explosions, 2);
        assert_eq!(t.cascade_steps, 2);
        assert_eq!(t.state.board.sole_owner(), Some(P0));
        // Placement, then reset plus two neighbor frames per explosion.
        assert_eq!(snapshots.len(), 7);
        assert_eq!(snapshots.last().map(|s| &s.board), Some(&t.state.board));
    }

    #[test]
    fn test_unarmed_cascade_is_not_cut_short() {
        // Three players, second move: P1 alone on the board is not a win, so
        // the cascade runs until the board is stable.
        let rules = ChainReaction::new(GameConfig::new(3, 3).with_players(3)).unwrap();
        let board = Board::new(3, 3)
            .with_cell(Coord::new(0, 0), Cell::occupied(1, P1))
            .with_cell(Coord::new(0, 1), Cell::occupied(2, P0));
        let state = GameState::from_board(board, P1, 1);

        let t = rules.apply_move(&state, Coord::new(0, 0), &mut NoopSink).unwrap();

        assert_eq!(t.state.winner, None);
        assert!(t.state.board.is_stable());
        assert_eq!(t.record.explosions, 2);
    }
}
