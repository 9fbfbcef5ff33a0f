//! Board geometry and the electron-transfer arithmetic shared by both
//! simulation variants.

use crate::{Board, PlayerId, Pos, Square};

/// Orthogonal neighbours of `pos` that lie on a board of edge `size`.
///
/// Order: up, down, left, right.
pub fn neighbors(pos: Pos, size: u8) -> impl Iterator<Item = Pos> {
    let Pos { row, col } = pos;
    let up = (row > 0).then(|| Pos::new(row - 1, col));
    let down = (row + 1 < size).then(|| Pos::new(row + 1, col));
    let left = (col > 0).then(|| Pos::new(row, col - 1));
    let right = (col + 1 < size).then(|| Pos::new(row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// Number of electrons a square holds before exploding: 2 in a corner,
/// 3 on an edge, 4 inside.
#[inline]
pub fn capacity(pos: Pos, size: u8) -> u32 {
    let edge = |coord: u8| u32::from(coord == 0) + u32::from(coord + 1 == size);
    4 - edge(pos.row) - edge(pos.col)
}

/// A player may target a square that is unowned or already theirs.
#[inline]
pub fn can_target(player: PlayerId, square: Square) -> bool {
    square.is_unowned() || square.owner == Some(player)
}

/// Deliver one of `mover`'s electrons to the square at `pos`.
///
/// Any electrons already on the square are captured: debited from the
/// previous owner and credited to `mover`. The incoming electron belongs
/// to `mover` already, so totals stay equal to the per-owner sums.
/// Returns the square's new electron count.
pub fn add_electron(board: &mut Board, counts: &mut [u32], mover: PlayerId, pos: Pos) -> u32 {
    let square = board.get(pos);
    capture(counts, mover, square);
    let electrons = square.electrons + 1;
    board.set(pos, Square::new(mover, electrons));
    electrons
}

/// Remove `capacity` electrons from an exploding square owned by `mover`.
pub fn discharge(board: &mut Board, mover: PlayerId, pos: Pos) {
    let square = board.get(pos);
    let remaining = square.electrons.saturating_sub(capacity(pos, board.size()));
    board.set(pos, Square::new(mover, remaining));
}

/// Move a square's electron load from its owner to `mover`.
#[inline]
fn capture(counts: &mut [u32], mover: PlayerId, square: Square) {
    match square.owner {
        Some(owner) if owner != mover => {
            counts[owner.index()] -= square.electrons;
            counts[mover.index()] += square.electrons;
        }
        _ => {}
    }
}

/// All squares `player` may target, in row-major order.
pub fn move_targets(board: &Board, player: PlayerId) -> Vec<Pos> {
    board
        .squares()
        .filter(|&(_, square)| can_target(player, square))
        .map(|(pos, _)| pos)
        .collect()
}

/// Mover already holds every electron that belonged to the other players.
///
/// Only meaningful once every player has placed an electron; before that,
/// opponents legitimately have nothing on the board.
pub fn stole_all_electrons(mover: PlayerId, counts: &[u32], all_players_moved: bool) -> bool {
    all_players_moved
        && counts
            .iter()
            .enumerate()
            .all(|(idx, &count)| idx == mover.index() || count == 0)
}
