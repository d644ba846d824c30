//! Shuffle module - randomized initial placement
//!
//! The position array is permuted with Fisher-Yates and assigned back onto
//! the pieces, so the result is always a bijection and every arrangement is
//! equally likely. Two adjustments follow the raw permutation:
//!
//! - A shuffle that lands on the solved arrangement is redrawn (bounded by
//!   [`MAX_SHUFFLE_ATTEMPTS`], then a single forced move), so a new game
//!   never starts finished.
//! - On a sliding board, half of all permutations cannot be solved by
//!   sliding. Those are repaired by swapping two non-blank pieces, which
//!   flips the permutation parity without moving the empty slot.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::types::{GridPos, MAX_SHUFFLE_ATTEMPTS};

/// Randomize the board in place.
pub fn shuffle_board(board: &mut Board, rng: &mut SimpleRng) {
    let mut positions: Vec<GridPos> = board.pieces().iter().map(|p| p.correct).collect();
    if positions.len() < 2 {
        return;
    }

    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        rng.shuffle(&mut positions);
        board.apply_arrangement(&positions);
        if board.blank().is_some() && !is_solvable(board) {
            repair_parity(board, &mut positions);
        }
        if !crate::completion::is_solved(board) {
            break;
        }
    }
    if crate::completion::is_solved(board) {
        nudge(board);
    }
    board.clear_transients();
}

/// Last resort when every redraw came back solved: make one legal move.
fn nudge(board: &mut Board) {
    match board.blank() {
        Some(_) => {
            if let Some(&id) = board.slidable().first() {
                board.slide(id);
            }
        }
        None => {
            board.swap(0, 1);
        }
    }
}

/// Whether a sliding board can reach the solved state by slides alone.
///
/// Each slide is a transposition with the blank and moves the blank by one
/// cell, so `parity(permutation) == manhattan(blank, home) % 2` is invariant.
/// For grids of at least 2x2 the condition is also sufficient. Boards
/// without an empty slot are always solvable (any swap is allowed).
pub fn is_solvable(board: &Board) -> bool {
    let Some(blank) = board.blank().and_then(|id| board.piece(id)) else {
        return true;
    };
    let distance = blank.current.manhattan(blank.correct);
    permutation_parity(board) == distance % 2
}

/// Parity of the piece → cell permutation (0 = even, 1 = odd).
fn permutation_parity(board: &Board) -> u32 {
    let cols = board.cols();
    let n = board.len();
    let mut visited = vec![false; n];
    let mut cycles = 0usize;
    for start in 0..n {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = match board.piece(i) {
                Some(p) => p.current.index(cols),
                None => break,
            };
        }
    }
    ((n - cycles) % 2) as u32
}

fn repair_parity(board: &mut Board, positions: &mut [GridPos]) {
    let blank = board.blank();
    let mut movable = (0..positions.len()).filter(|&id| Some(id) != blank);
    if let (Some(a), Some(b)) = (movable.next(), movable.next()) {
        positions.swap(a, b);
        board.apply_arrangement(positions);
    }
}
