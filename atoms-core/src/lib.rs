//! Exploding Atoms game logic: board model, chain-reaction simulation and
//! minimax move search.
//!
//! # Rules
//!
//! ```text
//! Players take turns placing one electron on a square that is either
//! unowned or already theirs. A square holding as many electrons as it has
//! orthogonal neighbours explodes:
//!
//!   corner   capacity 2      2 . . 3
//!   edge     capacity 3      3 . . 4
//!   interior capacity 4
//!
//! The exploding square loses `capacity` electrons and every neighbour
//! gains one, switching to the exploding player's ownership together with
//! whatever electrons it already held. The game ends once a single player
//! owns every electron on the board.
//! ```
//!
//! # Layout
//!
//! - [`Board`], [`Square`], [`BoardState`], [`DetailedMove`] live here.
//! - [`geometry`] holds the capacity/neighbour helpers shared by both
//!   simulation variants.
//! - [`simulate`] computes the next state (compact) or the wave-by-wave
//!   breakdown of a move (detailed).
//! - [`search`] picks computer moves with alpha-beta minimax.
//! - [`game`] is the controller that owns the current state and turn.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod search;
pub mod simulate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{GameConfig, PlayerKind};
pub use error::{ConfigError, MoveError};
pub use game::GameController;
pub use search::{SearchStats, Searcher};

/// Default board edge length.
pub const BOARD_SIZE: u8 = 8;
/// Default number of players.
pub const PLAYERS_COUNT: usize = 2;

/// Player identifier (0-based seat index).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Index into per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The player who moves after this one (round-robin).
    #[inline]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }

    /// Even seats maximize the evaluation, odd seats minimize it.
    #[inline]
    pub fn is_maximizing(self) -> bool {
        self.0 % 2 == 0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Position on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Create a position from row and column.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }

    /// Check if this position lies on a board of the given size.
    #[inline]
    pub fn is_within(self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    /// Row-major index on a board of the given size.
    #[inline]
    pub fn index(self, size: u8) -> usize {
        debug_assert!(self.is_within(size));
        self.row as usize * size as usize + self.col as usize
    }

    /// Iterate over all positions of a board in row-major order.
    pub fn all(size: u8) -> impl Iterator<Item = Pos> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Pos::new(row, col)))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A single square: its owner (if any) and electron count.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Square {
    pub owner: Option<PlayerId>,
    pub electrons: u32,
}

impl Square {
    /// An unowned square with no electrons.
    pub const EMPTY: Square = Square { owner: None, electrons: 0 };

    /// Build a square, dropping ownership when it holds no electrons.
    #[inline]
    pub fn new(owner: PlayerId, electrons: u32) -> Square {
        if electrons == 0 {
            Square::EMPTY
        } else {
            Square { owner: Some(owner), electrons }
        }
    }

    /// Check if the square has no owner.
    #[inline]
    pub fn is_unowned(&self) -> bool {
        self.owner.is_none()
    }
}

// ============================================================================
// Board
// ============================================================================

/// Immutable `size × size` grid of squares.
///
/// Clones are deep copies. Simulation mutates only its private working copy
/// and publishes it inside a fresh [`BoardState`].
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    squares: Vec<Square>,
}

impl Board {
    /// Create an empty board of the given edge length.
    pub fn new(size: u8) -> Board {
        Board {
            size,
            squares: vec![Square::EMPTY; size as usize * size as usize],
        }
    }

    /// Edge length of the board.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get the square at a position. Panics if the position is off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Square {
        self.squares[pos.index(self.size)]
    }

    /// Return a new board that differs from this one at `pos`.
    pub fn with_replaced(&self, pos: Pos, square: Square) -> Board {
        let mut board = self.clone();
        board.set(pos, square);
        board
    }

    /// Overwrite a square on a working copy.
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, square: Square) {
        let idx = pos.index(self.size);
        self.squares[idx] = square;
    }

    /// Iterate over `(position, square)` pairs in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (Pos, Square)> + '_ {
        Pos::all(self.size).zip(self.squares.iter().copied())
    }

    /// Total electrons on the board.
    pub fn total_electrons(&self) -> u32 {
        self.squares.iter().map(|sq| sq.electrons).sum()
    }

    /// Electrons on squares owned by `player`.
    pub fn electrons_owned_by(&self, player: PlayerId) -> u32 {
        self.squares
            .iter()
            .filter(|sq| sq.owner == Some(player))
            .map(|sq| sq.electrons)
            .sum()
    }
}

// ============================================================================
// BoardState
// ============================================================================

/// Snapshot of the game: board, the target that produced it and per-player
/// electron totals.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardState {
    board: Board,
    last_target: Option<Pos>,
    electron_counts: Vec<u32>,
}

impl BoardState {
    /// Initial state: empty board, zero electrons for every player.
    pub fn new(board_size: u8, player_count: usize) -> BoardState {
        BoardState {
            board: Board::new(board_size),
            last_target: None,
            electron_counts: vec![0; player_count],
        }
    }

    pub(crate) fn from_parts(
        board: Board,
        last_target: Pos,
        electron_counts: Vec<u32>,
    ) -> BoardState {
        BoardState {
            board,
            last_target: Some(last_target),
            electron_counts,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The target square of the move that produced this state.
    #[inline]
    pub fn last_target(&self) -> Option<Pos> {
        self.last_target
    }

    #[inline]
    pub fn electron_counts(&self) -> &[u32] {
        &self.electron_counts
    }

    #[inline]
    pub fn electrons_of(&self, player: PlayerId) -> u32 {
        self.electron_counts[player.index()]
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.electron_counts.len()
    }

    /// Sum of all players' electron totals.
    pub fn total_electrons(&self) -> u32 {
        self.electron_counts.iter().sum()
    }

    /// Every player has placed at least one electron.
    pub fn all_players_moved(&self) -> bool {
        self.total_electrons() as usize >= self.player_count()
    }

    /// A single player owns every electron on the board.
    ///
    /// Never true before all players have moved, otherwise the first
    /// electron of the game would end it.
    pub fn is_terminal(&self) -> bool {
        if !self.all_players_moved() {
            return false;
        }
        let mut alive = self.electron_counts.iter().filter(|&&count| count > 0);
        alive.next().is_some() && alive.next().is_none()
    }

    /// The sole remaining player, if the state is terminal.
    pub fn sole_owner(&self) -> Option<PlayerId> {
        if !self.is_terminal() {
            return None;
        }
        self.electron_counts
            .iter()
            .position(|&count| count > 0)
            .map(|idx| PlayerId(idx as u8))
    }
}

// ============================================================================
// Detailed moves
// ============================================================================

/// One wave of simultaneous explosions.
///
/// The opening placement is a phase with no origins and a single target.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DetailedMovePhase {
    pub explosion_origins: Vec<Pos>,
    pub explosion_targets: Vec<Pos>,
    pub board_after: Board,
}

/// A move broken down into phases for step-by-step presentation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DetailedMove {
    pub player: PlayerId,
    pub phases: Vec<DetailedMovePhase>,
}

impl DetailedMove {
    /// Board after the last phase.
    pub fn final_board(&self) -> &Board {
        // Every detailed move starts with the placement phase.
        &self.phases[self.phases.len() - 1].board_after
    }

    /// Number of explosion waves (phases after the placement).
    pub fn wave_count(&self) -> usize {
        self.phases.len().saturating_sub(1)
    }

    /// The square the electron was placed on.
    pub fn target(&self) -> Pos {
        self.phases[0].explosion_targets[0]
    }
}
