//! Layout, shuffle and completion properties over a range of grid sizes.

use std::collections::HashSet;

use tui_jigsaw::core::{
    generate_pieces, is_solvable, is_solved, shuffle_board, Board, CompletionDetector, SimpleRng,
};
use tui_jigsaw::types::GridPos;

fn all_cells(rows: u16, cols: u16) -> HashSet<GridPos> {
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| GridPos::new(r, c)))
        .collect()
}

fn board(rows: u16, cols: u16, sliding: bool) -> Board {
    let pieces = generate_pieces(rows, cols, 640, 480).unwrap();
    let blank = sliding.then(|| (rows as usize * cols as usize - 1) as _);
    Board::new(rows, cols, pieces, blank)
}

fn occupied(board: &Board) -> HashSet<GridPos> {
    board.pieces().iter().map(|p| p.current).collect()
}

#[test]
fn layout_produces_every_cell_exactly_once() {
    for rows in 1..=6 {
        for cols in 1..=6 {
            let pieces = generate_pieces(rows, cols, 300, 200).unwrap();
            assert_eq!(pieces.len(), rows as usize * cols as usize);

            let ids: HashSet<_> = pieces.iter().map(|p| p.id).collect();
            assert_eq!(ids.len(), pieces.len());
            assert!(ids.iter().all(|&id| (id as usize) < pieces.len()));

            let correct: HashSet<_> = pieces.iter().map(|p| p.correct).collect();
            assert_eq!(correct, all_cells(rows, cols), "{rows}x{cols}");
        }
    }
}

#[test]
fn shuffle_is_a_bijection_and_never_solved() {
    for seed in 1..40 {
        let mut b = board(4, 5, false);
        shuffle_board(&mut b, &mut SimpleRng::new(seed));
        assert_eq!(occupied(&b), all_cells(4, 5), "seed {seed}");
        assert!(b.is_bijection());
        assert!(!is_solved(&b));
    }
}

#[test]
fn sliding_shuffle_is_always_solvable() {
    for seed in 1..40 {
        let mut b = board(3, 3, true);
        shuffle_board(&mut b, &mut SimpleRng::new(seed));
        assert!(is_solvable(&b), "seed {seed}");
        assert!(b.is_bijection());
    }
}

#[test]
fn swap_preserves_the_occupied_set() {
    let mut b = board(3, 4, false);
    shuffle_board(&mut b, &mut SimpleRng::new(99));
    let before = occupied(&b);
    for (a, c) in [(0, 5), (3, 11), (7, 2), (4, 4)] {
        b.swap(a, c);
        assert_eq!(occupied(&b), before);
    }
}

#[test]
fn detector_is_idempotent_and_exact() {
    let mut b = board(3, 3, false);
    let mut detector = CompletionDetector::new();

    let first = detector.evaluate(&b);
    let second = detector.evaluate(&b);
    assert!(first.solved);
    assert_eq!(first.solved, second.solved);

    // One displaced pair is enough to be unsolved.
    b.swap(2, 6);
    assert!(!detector.evaluate(&b).solved);
    assert!(!detector.evaluate(&b).solved);

    b.reset();
    let again = detector.evaluate(&b);
    assert!(again.solved);
    assert!(again.just_completed);
    assert!(!detector.evaluate(&b).just_completed);
}

#[test]
fn same_seed_same_shuffle() {
    let mut a = board(5, 5, false);
    let mut b = board(5, 5, false);
    shuffle_board(&mut a, &mut SimpleRng::new(2024));
    shuffle_board(&mut b, &mut SimpleRng::new(2024));
    assert_eq!(a.positions(), b.positions());
}
