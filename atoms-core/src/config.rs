//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{BOARD_SIZE, PLAYERS_COUNT};

/// Default minimax depth below the root move.
pub const MINIMAX_DEPTH: u32 = 3;

/// Largest seat count a [`PlayerId`](crate::PlayerId) can address.
pub const MAX_PLAYERS: usize = u8::MAX as usize + 1;

/// Who controls a seat.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Computer,
}

/// Settings for a new game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the square board.
    pub board_size: u8,
    /// Number of seats.
    pub player_count: usize,
    /// Plies searched below each candidate root move.
    pub search_depth: u32,
    /// Seed for the search tie-break.
    pub seed: u64,
}

impl GameConfig {
    /// Reject boards and player counts the rules cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
            });
        }
        if self.player_count < 2 {
            return Err(ConfigError::TooFewPlayers {
                count: self.player_count,
            });
        }
        if self.player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerIdOverflow {
                count: self.player_count,
            });
        }
        let squares = self.board_size as usize * self.board_size as usize;
        if self.player_count > squares {
            return Err(ConfigError::TooManyPlayers {
                count: self.player_count,
                size: self.board_size,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            player_count: PLAYERS_COUNT,
            search_depth: MINIMAX_DEPTH,
            seed: 0,
        }
    }
}
