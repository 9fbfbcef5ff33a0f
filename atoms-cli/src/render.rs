//! Plain-text rendering of boards and detailed moves.
//!
//! Board layout (4x4 example):
//!
//! ```text
//!      0   1   2   3
//!  0  A1  .   .   B2
//!  1  .   A3* .   .
//! ```
//!
//! Each square shows its owner letter (A = P0, B = P1, ...) and electron
//! count. `*` marks the highlighted square.

use std::fmt::Write;

use atoms_core::{Board, DetailedMove, PlayerId, Pos};

const CELL_WIDTH: usize = 4;

/// Letter used for a player's squares.
pub fn player_letter(player: PlayerId) -> char {
    (b'A' + player.0 % 26) as char
}

/// Render a board, optionally marking one square.
pub fn render_board(board: &Board, highlight: Option<Pos>) -> String {
    let size = board.size();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..size {
        let _ = write!(out, "{:>w$}", col, w = CELL_WIDTH);
    }
    out.push('\n');

    for row in 0..size {
        let _ = write!(out, "{:>3}", row);
        for col in 0..size {
            let pos = Pos::new(row, col);
            let square = board.get(pos);
            let mut cell = match square.owner {
                Some(owner) => format!("{}{}", player_letter(owner), square.electrons),
                None => ".".to_string(),
            };
            if highlight == Some(pos) {
                cell.push('*');
            }
            let _ = write!(out, "{:>w$}", cell, w = CELL_WIDTH);
        }
        out.push('\n');
    }
    out
}

/// Render every phase of a move.
pub fn render_move(mov: &DetailedMove) -> String {
    let mut out = String::new();
    for (idx, phase) in mov.phases.iter().enumerate() {
        if idx == 0 {
            let _ = writeln!(
                out,
                "{} places on {}",
                player_letter(mov.player),
                format_positions(&phase.explosion_targets)
            );
        } else {
            let _ = writeln!(
                out,
                "wave {}: {} explode -> {}",
                idx,
                format_positions(&phase.explosion_origins),
                format_positions(&phase.explosion_targets)
            );
        }
        out.push_str(&render_board(&phase.board_after, phase.explosion_targets.first().copied()));
    }
    out
}

fn format_positions(positions: &[Pos]) -> String {
    positions
        .iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse "row col", "row,col" or "(row,col)" into a position.
pub fn parse_pos(s: &str) -> Option<Pos> {
    let s = s.trim().trim_start_matches('(').trim_end_matches(')');
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() != 2 {
        return None;
    }
    let row: u8 = parts[0].parse().ok()?;
    let col: u8 = parts[1].parse().ok()?;
    Some(Pos::new(row, col))
}
