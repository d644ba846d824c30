//! Board module - piece placement and mutation primitives
//!
//! The board owns the piece set and an occupancy table (cell index → piece
//! id). Every primitive keeps the two in sync, so `current` positions stay a
//! bijection onto the grid's cells at all times.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{GridPos, PieceId};

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u16,
    cols: u16,
    pieces: Vec<Piece>,
    /// Row-major occupancy: `occupants[cell.index(cols)]` is the piece there.
    occupants: Vec<PieceId>,
    /// Piece whose cell is the empty slot (sliding variant only).
    blank: Option<PieceId>,
}

impl Board {
    /// Wrap a freshly generated (solved) piece set.
    pub fn new(rows: u16, cols: u16, pieces: Vec<Piece>, blank: Option<PieceId>) -> Self {
        let mut board = Self {
            rows,
            cols,
            pieces,
            occupants: Vec::new(),
            blank: blank.filter(|&id| id < rows as usize * cols as usize),
        };
        board.rebuild_occupants();
        board
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id)
    }

    pub fn blank(&self) -> Option<PieceId> {
        self.blank
    }

    /// The empty slot of a sliding puzzle.
    pub fn empty_slot(&self) -> Option<GridPos> {
        self.blank.and_then(|id| self.piece(id)).map(|p| p.current)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn occupant(&self, pos: GridPos) -> Option<PieceId> {
        if !self.contains(pos) {
            return None;
        }
        self.occupants.get(pos.index(self.cols)).copied()
    }

    /// Current positions in piece-id order.
    pub fn positions(&self) -> Vec<GridPos> {
        self.pieces.iter().map(|p| p.current).collect()
    }

    /// Orthogonal neighbours of a cell that lie on the board.
    pub fn neighbors(&self, pos: GridPos) -> ArrayVec<GridPos, 4> {
        let mut out = ArrayVec::new();
        if pos.row > 0 {
            out.push(GridPos::new(pos.row - 1, pos.col));
        }
        if pos.col + 1 < self.cols {
            out.push(GridPos::new(pos.row, pos.col + 1));
        }
        if pos.row + 1 < self.rows {
            out.push(GridPos::new(pos.row + 1, pos.col));
        }
        if pos.col > 0 {
            out.push(GridPos::new(pos.row, pos.col - 1));
        }
        out
    }

    /// Exchange the cells of two pieces.
    ///
    /// Returns false (and changes nothing) for unknown ids or `a == b`.
    pub fn swap(&mut self, a: PieceId, b: PieceId) -> bool {
        if a == b || a >= self.pieces.len() || b >= self.pieces.len() {
            return false;
        }
        let pa = self.pieces[a].current;
        let pb = self.pieces[b].current;
        self.pieces[a].current = pb;
        self.pieces[b].current = pa;
        self.occupants[pa.index(self.cols)] = b;
        self.occupants[pb.index(self.cols)] = a;
        true
    }

    /// Put `piece` into `cell`; whoever was there takes the piece's old cell.
    ///
    /// Returns the displaced piece, or `None` when nothing moved.
    pub fn move_to(&mut self, piece: PieceId, cell: GridPos) -> Option<PieceId> {
        let occupant = self.occupant(cell)?;
        if occupant == piece {
            return None;
        }
        self.swap(piece, occupant).then_some(occupant)
    }

    /// Slide a piece into the adjacent empty slot.
    ///
    /// Returns `(from, to)` on success.
    pub fn slide(&mut self, piece: PieceId) -> Option<(GridPos, GridPos)> {
        let blank = self.blank?;
        if piece == blank {
            return None;
        }
        let from = self.piece(piece)?.current;
        let to = self.piece(blank)?.current;
        if !from.is_adjacent(to) {
            return None;
        }
        self.swap(piece, blank).then_some((from, to))
    }

    /// Pieces that could slide right now (adjacent to the empty slot).
    pub fn slidable(&self) -> ArrayVec<PieceId, 4> {
        let mut out = ArrayVec::new();
        if let Some(slot) = self.empty_slot() {
            for n in self.neighbors(slot) {
                if let Some(id) = self.occupant(n) {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Put every piece back in its correct cell.
    pub fn reset(&mut self) {
        for piece in &mut self.pieces {
            piece.current = piece.correct;
            piece.clear_transient();
        }
        self.rebuild_occupants();
    }

    /// Assign `positions[i]` to piece `i`.
    ///
    /// Callers guarantee `positions` is a permutation of the grid cells.
    pub(crate) fn apply_arrangement(&mut self, positions: &[GridPos]) {
        debug_assert_eq!(positions.len(), self.pieces.len());
        for (piece, &pos) in self.pieces.iter_mut().zip(positions) {
            piece.current = pos;
        }
        self.rebuild_occupants();
    }

    pub fn clear_transients(&mut self) {
        for piece in &mut self.pieces {
            piece.clear_transient();
        }
    }

    /// True when every cell holds exactly one piece.
    pub fn is_bijection(&self) -> bool {
        let cells = self.rows as usize * self.cols as usize;
        if self.pieces.len() != cells {
            return false;
        }
        let mut seen = vec![false; cells];
        for piece in &self.pieces {
            if !self.contains(piece.current) {
                return false;
            }
            let i = piece.current.index(self.cols);
            if seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    fn rebuild_occupants(&mut self) {
        let cells = self.rows as usize * self.cols as usize;
        self.occupants.clear();
        self.occupants.resize(cells, 0);
        for piece in &self.pieces {
            if self.contains(piece.current) {
                self.occupants[piece.current.index(self.cols)] = piece.id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate_pieces;

    fn board(rows: u16, cols: u16, blank: Option<PieceId>) -> Board {
        Board::new(rows, cols, generate_pieces(rows, cols, 90, 90).unwrap(), blank)
    }

    #[test]
    fn test_swap_exchanges_cells_and_occupants() {
        let mut b = board(3, 3, None);
        assert!(b.swap(0, 4));
        assert_eq!(b.piece(0).unwrap().current, GridPos::new(1, 1));
        assert_eq!(b.piece(4).unwrap().current, GridPos::new(0, 0));
        assert_eq!(b.occupant(GridPos::new(0, 0)), Some(4));
        assert_eq!(b.occupant(GridPos::new(1, 1)), Some(0));
        assert!(b.is_bijection());
    }

    #[test]
    fn test_swap_rejects_self_and_unknown() {
        let mut b = board(2, 2, None);
        assert!(!b.swap(1, 1));
        assert!(!b.swap(0, 99));
        assert!(b.pieces().iter().all(Piece::is_correct));
    }

    #[test]
    fn test_move_to_own_cell_is_noop() {
        let mut b = board(2, 2, None);
        assert_eq!(b.move_to(3, GridPos::new(1, 1)), None);
        assert_eq!(b.move_to(3, GridPos::new(0, 0)), Some(0));
        assert_eq!(b.piece(0).unwrap().current, GridPos::new(1, 1));
    }

    #[test]
    fn test_slide_only_into_adjacent_empty_slot() {
        let mut b = board(3, 3, Some(8));
        assert_eq!(b.empty_slot(), Some(GridPos::new(2, 2)));

        // Piece 0 is nowhere near the slot.
        assert_eq!(b.slide(0), None);
        // The blank cannot slide into itself.
        assert_eq!(b.slide(8), None);

        assert_eq!(b.slide(7), Some((GridPos::new(2, 1), GridPos::new(2, 2))));
        assert_eq!(b.empty_slot(), Some(GridPos::new(2, 1)));
        assert!(b.is_bijection());
    }

    #[test]
    fn test_slidable_lists_slot_neighbors() {
        let b = board(3, 3, Some(8));
        let mut ids: Vec<_> = b.slidable().into_iter().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![5, 7]);
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let b = board(3, 3, None);
        assert_eq!(b.neighbors(GridPos::new(0, 0)).len(), 2);
        assert_eq!(b.neighbors(GridPos::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_reset_restores_every_piece() {
        let mut b = board(3, 3, None);
        b.swap(0, 8);
        b.swap(2, 5);
        b.reset();
        assert!(b.pieces().iter().all(Piece::is_correct));
        assert!(b.is_bijection());
    }
}
