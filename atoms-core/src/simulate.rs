//! Chain-reaction move simulation.
//!
//! Two variants produce the same final board and electron totals:
//!
//! - **Compact** ([`generate_move`]): processes single electron arrivals
//!   from a FIFO queue. Used by search, where only the resulting state
//!   matters.
//! - **Detailed** ([`generate_detailed_move`]): groups explosions into
//!   waves that happen at the same time and snapshots the board after
//!   each one, for step-by-step presentation.
//!
//! Both stop early once every player has moved and the mover holds all
//! electrons. Past that point the position is won and a full-board
//! cascade could otherwise keep exploding forever.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::MoveError;
use crate::geometry::{
    add_electron, can_target, capacity, discharge, move_targets, neighbors, stole_all_electrons,
};
use crate::{Board, BoardState, DetailedMove, DetailedMovePhase, PlayerId, Pos};

/// Check that `player` may place an electron on `target`.
pub fn check_target(state: &BoardState, player: PlayerId, target: Pos) -> Result<(), MoveError> {
    let board = state.board();
    if !target.is_within(board.size()) {
        return Err(MoveError::OutOfBounds {
            position: target,
            size: board.size(),
        });
    }
    let square = board.get(target);
    match square.owner {
        Some(owner) if !can_target(player, square) => Err(MoveError::Occupied {
            position: target,
            owner,
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// Compact transition
// ============================================================================

/// Compute the state after `player` places an electron on `target`.
pub fn try_generate_move(
    state: &BoardState,
    player: PlayerId,
    target: Pos,
) -> Result<BoardState, MoveError> {
    check_target(state, player, target)?;
    Ok(next_state(state, player, target))
}

/// Compute the state after `player` places an electron on `target`, or
/// `None` if the target is not legal for `player`.
pub fn generate_move(state: &BoardState, player: PlayerId, target: Pos) -> Option<BoardState> {
    try_generate_move(state, player, target).ok()
}

/// All states `player` can reach in one move, in row-major target order.
pub fn generate_all_moves(state: &BoardState, player: PlayerId) -> Vec<BoardState> {
    move_targets(state.board(), player)
        .into_iter()
        .map(|target| next_state(state, player, target))
        .collect()
}

/// Queue-driven transition. Caller has validated `target`.
fn next_state(state: &BoardState, player: PlayerId, target: Pos) -> BoardState {
    let all_players_moved = state.all_players_moved();
    let mut board = state.board().clone();
    let mut counts = state.electron_counts().to_vec();
    let size = board.size();

    // Credit the placed electron up front.
    counts[player.index()] += 1;

    let mut queue = VecDeque::from([target]);
    let mut placed = false;
    while let Some(pos) = queue.pop_front() {
        if placed && stole_all_electrons(player, &counts, all_players_moved) {
            break;
        }
        placed = true;

        let electrons = add_electron(&mut board, &mut counts, player, pos);
        if electrons >= capacity(pos, size) {
            discharge(&mut board, player, pos);
            queue.extend(neighbors(pos, size));
        }
    }

    BoardState::from_parts(board, target, counts)
}

// ============================================================================
// Detailed move
// ============================================================================

/// Break the move of `player` on `target` into explosion waves.
pub fn try_generate_detailed_move(
    state: &BoardState,
    player: PlayerId,
    target: Pos,
) -> Result<DetailedMove, MoveError> {
    check_target(state, player, target)?;

    let all_players_moved = state.all_players_moved();
    let mut board = state.board().clone();
    let mut counts = state.electron_counts().to_vec();
    counts[player.index()] += 1;

    let mut phases = Vec::new();

    // Phase 0: the placement itself. The target is empty or already ours,
    // so nothing is captured.
    add_electron(&mut board, &mut counts, player, target);
    phases.push(DetailedMovePhase {
        explosion_origins: Vec::new(),
        explosion_targets: vec![target],
        board_after: board.clone(),
    });

    let mut origins = find_explosions(&board);
    while !origins.is_empty() && !stole_all_electrons(player, &counts, all_players_moved) {
        let phase = explode_wave(&mut board, &mut counts, player, origins);
        trace!(
            wave = phases.len(),
            origins = phase.explosion_origins.len(),
            counts = ?counts,
            "explosion wave"
        );
        phases.push(phase);
        origins = find_explosions(&board);
    }

    Ok(DetailedMove { player, phases })
}

/// Detailed breakdown of a move, or `None` if the target is not legal.
pub fn generate_detailed_move(
    state: &BoardState,
    player: PlayerId,
    target: Pos,
) -> Option<DetailedMove> {
    try_generate_detailed_move(state, player, target).ok()
}

/// Squares at or above capacity, in row-major order.
fn find_explosions(board: &Board) -> Vec<Pos> {
    let size = board.size();
    board
        .squares()
        .filter(|&(pos, square)| square.electrons >= capacity(pos, size))
        .map(|(pos, _)| pos)
        .collect()
}

/// Explode every origin once and snapshot the board.
fn explode_wave(
    board: &mut Board,
    counts: &mut [u32],
    player: PlayerId,
    origins: Vec<Pos>,
) -> DetailedMovePhase {
    let size = board.size();
    let mut targets = Vec::with_capacity(origins.len() * 4);
    for &origin in &origins {
        for neighbor in neighbors(origin, size) {
            add_electron(board, counts, player, neighbor);
            targets.push(neighbor);
        }
        discharge(board, player, origin);
    }
    DetailedMovePhase {
        explosion_origins: origins,
        explosion_targets: targets,
        board_after: board.clone(),
    }
}
