//! Command-line interface for the atoms driver.

use clap::{Parser, ValueEnum};

use atoms_core::config::MINIMAX_DEPTH;
use atoms_core::{GameConfig, PlayerKind, BOARD_SIZE};

/// Exploding Atoms - chain-reaction board game in the terminal
#[derive(Parser, Debug)]
#[command(name = "atoms")]
#[command(about = "Play Exploding Atoms against a human or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board edge length
    #[arg(short, long, default_value_t = BOARD_SIZE)]
    pub size: u8,

    /// Search depth below each candidate move
    #[arg(short, long, default_value_t = MINIMAX_DEPTH)]
    pub depth: u32,

    /// Seed for the computer's tie-break
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Who plays the first seat
    #[arg(long, value_enum, default_value_t = Seat::Human)]
    pub player0: Seat,

    /// Who plays the second seat
    #[arg(long, value_enum, default_value_t = Seat::Computer)]
    pub player1: Seat,

    /// Stop after this many moves
    #[arg(long, default_value_t = 1000)]
    pub max_moves: usize,
}

/// Seat controller as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Seat {
    Human,
    Computer,
}

impl From<Seat> for PlayerKind {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::Human => PlayerKind::Human,
            Seat::Computer => PlayerKind::Computer,
        }
    }
}

impl Cli {
    /// Game settings with the command-line overrides applied.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            board_size: self.size,
            search_depth: self.depth,
            seed: self.seed,
            ..GameConfig::default()
        }
    }

    /// Controller for each seat, indexed by player id.
    pub fn seats(&self) -> [PlayerKind; 2] {
        [self.player0.into(), self.player1.into()]
    }
}
