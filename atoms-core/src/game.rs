//! Game controller: owns the current state and whose turn it is.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::search::{SearchStats, Searcher};
use crate::simulate::{try_generate_detailed_move, try_generate_move};
use crate::{Board, BoardState, DetailedMove, PlayerId, Pos};

/// Running game between a fixed number of seats.
///
/// Every accepted move replaces the current [`BoardState`] wholesale. A
/// rejected move leaves state and turn untouched.
#[derive(Debug)]
pub struct GameController {
    state: BoardState,
    current_player: PlayerId,
    winner: Option<PlayerId>,
    searcher: Searcher<StdRng>,
}

impl GameController {
    /// Start a game with the given settings.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Start a game with a caller-supplied tie-break RNG.
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(&config, rng))
    }

    fn from_valid(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            state: BoardState::new(config.board_size, config.player_count),
            current_player: PlayerId(0),
            winner: None,
            searcher: Searcher::new(rng, config.search_depth),
        }
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Independent copy of the current board.
    ///
    /// Once the game is won this is the board where the search-side
    /// simulation stopped, which can differ from the final board of the
    /// winning [`DetailedMove`]. Only the winner owns squares on either.
    pub fn board_snapshot(&self) -> Board {
        self.state.board().clone()
    }

    /// The current state, for read-only inspection.
    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Statistics of the last computer move.
    pub fn last_search_stats(&self) -> SearchStats {
        self.searcher.stats()
    }

    /// Place an electron for the current player on `target`.
    ///
    /// Returns `None` if the game is over or the target is not legal. On a
    /// winning move the returned phases can end on a different board than
    /// [`board_snapshot`](Self::board_snapshot).
    pub fn perform_move(&mut self, target: Pos) -> Option<DetailedMove> {
        self.try_perform_move(target)
            .inspect_err(|err| debug!(%target, %err, "move rejected"))
            .ok()
    }

    /// Fallible form of [`perform_move`](Self::perform_move).
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_perform_move(&mut self, target: Pos) -> Result<DetailedMove, MoveError> {
        self.ensure_running()?;
        let detailed = try_generate_detailed_move(&self.state, self.current_player, target)?;
        let next = try_generate_move(&self.state, self.current_player, target)?;
        self.switch_to(next);
        Ok(detailed)
    }

    /// Let the search pick and play a move for the current player.
    ///
    /// Returns `None` if the game is over or no legal target exists.
    pub fn perform_ai_move(&mut self) -> Option<DetailedMove> {
        self.try_perform_ai_move()
            .inspect_err(|err| debug!(%err, "computer move failed"))
            .ok()
    }

    /// Fallible form of [`perform_ai_move`](Self::perform_ai_move).
    #[instrument(skip(self), fields(player = %self.current_player, depth = self.searcher.depth()))]
    pub fn try_perform_ai_move(&mut self) -> Result<DetailedMove, MoveError> {
        self.ensure_running()?;
        let player = self.current_player;
        let next = self.searcher.choose_move(&self.state, player)?;
        let target = next
            .last_target()
            .ok_or(MoveError::NoLegalTarget { player })?;
        let detailed = try_generate_detailed_move(&self.state, player, target)?;
        self.switch_to(next);
        Ok(detailed)
    }

    fn ensure_running(&self) -> Result<(), MoveError> {
        match self.winner {
            Some(winner) => Err(MoveError::GameOver { winner }),
            None => Ok(()),
        }
    }

    /// Adopt `next`, then either record the winner or pass the turn.
    fn switch_to(&mut self, next: BoardState) {
        self.state = next;
        if self.state.is_terminal() {
            info!(winner = %self.current_player, "game over");
            self.winner = Some(self.current_player);
        } else {
            self.current_player = self.current_player.next(self.state.player_count());
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        let config = GameConfig::default();
        Self::from_valid(&config, StdRng::seed_from_u64(config.seed))
    }
}
