//! Completion module - the all-pieces-correct predicate
//!
//! [`is_solved`] is pure. [`CompletionDetector`] wraps it with an edge
//! trigger: `just_completed` is reported only on the unsolved → solved
//! transition, and a latch suppresses repeats while the board stays solved.

use crate::board::Board;
use crate::piece::Piece;

/// True iff every piece sits in its correct cell.
pub fn is_solved(board: &Board) -> bool {
    board.pieces().iter().all(Piece::is_correct)
}

/// Result of one detector evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub solved: bool,
    /// True only on the evaluation that observed the transition into solved.
    pub just_completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionDetector {
    was_complete: bool,
    evaluations: u64,
}

impl CompletionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate after a placement mutation.
    pub fn evaluate(&mut self, board: &Board) -> Evaluation {
        self.evaluations += 1;
        let solved = is_solved(board);
        let just_completed = solved && !self.was_complete;
        self.was_complete = solved;
        Evaluation {
            solved,
            just_completed,
        }
    }

    /// Sync the latch with the board without reporting a transition.
    ///
    /// Used when a fresh piece set is installed.
    pub fn prime(&mut self, board: &Board) {
        self.was_complete = is_solved(board);
    }

    pub fn was_complete(&self) -> bool {
        self.was_complete
    }

    /// Number of evaluations since creation.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate_pieces;

    fn board() -> Board {
        Board::new(2, 2, generate_pieces(2, 2, 10, 10).unwrap(), None)
    }

    #[test]
    fn detects_single_displaced_pair() {
        let mut b = board();
        assert!(is_solved(&b));
        b.swap(0, 1);
        assert!(!is_solved(&b));
    }

    #[test]
    fn fires_once_on_transition() {
        let mut b = board();
        b.swap(0, 1);
        let mut d = CompletionDetector::new();
        d.prime(&b);

        assert_eq!(d.evaluate(&b), Evaluation { solved: false, just_completed: false });

        b.swap(0, 1);
        assert_eq!(d.evaluate(&b), Evaluation { solved: true, just_completed: true });
        // Latched: no re-fire while still solved.
        assert_eq!(d.evaluate(&b), Evaluation { solved: true, just_completed: false });
        assert_eq!(d.evaluations(), 3);
    }

    #[test]
    fn uninitialized_detector_fires_on_first_solved_evaluation() {
        let b = board();
        let mut d = CompletionDetector::new();
        assert!(d.evaluate(&b).just_completed);
    }

    #[test]
    fn leaving_solved_state_re_arms() {
        let mut b = board();
        let mut d = CompletionDetector::new();
        d.prime(&b);
        assert!(!d.evaluate(&b).just_completed);

        b.swap(2, 3);
        assert!(!d.evaluate(&b).solved);
        b.swap(2, 3);
        assert!(d.evaluate(&b).just_completed);
    }
}
