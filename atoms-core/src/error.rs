//! Error types for move handling and game configuration.

use thiserror::Error;

use crate::{PlayerId, Pos};

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {position} belongs to {owner}")]
    Occupied { position: Pos, owner: PlayerId },

    #[error("square {position} is outside the {size}x{size} board")]
    OutOfBounds { position: Pos, size: u8 },

    #[error("game is over, {winner} has won")]
    GameOver { winner: PlayerId },

    #[error("no legal target for {player}")]
    NoLegalTarget { player: PlayerId },
}

/// Invalid [`GameConfig`](crate::GameConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {size} is too small, need at least 2")]
    BoardTooSmall { size: u8 },

    #[error("{count} players configured, need at least 2")]
    TooFewPlayers { count: usize },

    #[error("{count} players configured, at most 256 are supported")]
    PlayerIdOverflow { count: usize },

    #[error("{count} players do not fit on a {size}x{size} board")]
    TooManyPlayers { count: usize, size: u8 },
}
