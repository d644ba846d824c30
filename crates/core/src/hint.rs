//! Hint module - finite, self-clearing piece highlights.

use crate::board::Board;
use crate::types::{PieceId, HINT_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveHint {
    piece: PieceId,
    remaining_ms: u32,
}

#[derive(Debug, Clone)]
pub struct HintState {
    budget: u32,
    duration_ms: u32,
    active: Option<ActiveHint>,
}

impl HintState {
    pub fn new(budget: u32) -> Self {
        Self::with_duration(budget, HINT_DURATION_MS)
    }

    pub fn with_duration(budget: u32, duration_ms: u32) -> Self {
        Self {
            budget,
            duration_ms,
            active: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.budget
    }

    pub fn active(&self) -> Option<PieceId> {
        self.active.map(|h| h.piece)
    }

    /// Highlight one misplaced piece and spend one hint.
    ///
    /// On a sliding board the pick prefers a misplaced piece that can move
    /// right now, falling back to any misplaced non-blank piece. Returns
    /// `None` (spending nothing) when the budget is empty or nothing is
    /// misplaced.
    pub fn request(&mut self, board: &mut Board) -> Option<PieceId> {
        if self.budget == 0 {
            return None;
        }
        let piece = pick(board)?;

        self.clear(board);
        if let Some(p) = board.piece_mut(piece) {
            p.is_hinted = true;
        }
        self.budget -= 1;
        self.active = Some(ActiveHint {
            piece,
            remaining_ms: self.duration_ms,
        });
        Some(piece)
    }

    /// Advance the highlight timer; returns true when the hint just expired.
    pub fn tick(&mut self, board: &mut Board, elapsed_ms: u32) -> bool {
        let Some(mut hint) = self.active else {
            return false;
        };
        hint.remaining_ms = hint.remaining_ms.saturating_sub(elapsed_ms);
        if hint.remaining_ms == 0 {
            self.clear(board);
            return true;
        }
        self.active = Some(hint);
        false
    }

    /// Remove the highlight (budget is not refunded).
    pub fn clear(&mut self, board: &mut Board) {
        if let Some(hint) = self.active.take() {
            if let Some(p) = board.piece_mut(hint.piece) {
                p.is_hinted = false;
            }
        }
    }
}

fn pick(board: &Board) -> Option<PieceId> {
    let blank = board.blank();
    let misplaced = |id: &PieceId| {
        Some(*id) != blank && board.piece(*id).is_some_and(|p| !p.is_correct())
    };

    if blank.is_some() {
        if let Some(id) = board.slidable().into_iter().find(misplaced) {
            return Some(id);
        }
    }
    (0..board.len()).find(misplaced)
}
