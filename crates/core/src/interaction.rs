//! Interaction module - pointer-driven state machines
//!
//! Two controllers share the board's mutation primitives:
//!
//! - [`DragController`]: `Idle` ⇄ `Dragging(piece)`. Only one piece can be
//!   dragged at a time; a second pointer-down during a drag is ignored.
//! - [`SelectController`]: `Idle` ⇄ `Selected(piece)` for swap puzzles, and
//!   immediate slides for sliding puzzles.
//!
//! Controllers never evaluate completion themselves; they report what
//! happened and [`crate::Puzzle`] runs the detector after any outcome that
//! can change placement.

use crate::board::Board;
use crate::layout::GridGeometry;
use crate::types::{GridPos, PieceId, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { piece: PieceId, offset: Point },
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece landed on another piece's cell and they traded places.
    Swapped { piece: PieceId, other: PieceId, to: GridPos },
    /// The piece snapped back into its own cell.
    Returned { piece: PieceId },
}

impl DropOutcome {
    pub fn mutated(&self) -> bool {
        matches!(self, DropOutcome::Swapped { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragging(&self) -> Option<PieceId> {
        match self.state {
            DragState::Dragging { piece, .. } => Some(piece),
            DragState::Idle => None,
        }
    }

    /// Start dragging `hit` if idle. Returns true when a drag began.
    pub fn pointer_down(
        &mut self,
        board: &mut Board,
        geometry: &GridGeometry,
        p: Point,
        hit: Option<PieceId>,
    ) -> bool {
        if self.dragging().is_some() {
            return false;
        }
        let Some(id) = hit else {
            return false;
        };
        if Some(id) == board.blank() {
            return false;
        }
        let Some(piece) = board.piece_mut(id) else {
            return false;
        };

        let origin = geometry.cell_origin(piece.current);
        let offset = p.offset_from(origin);
        piece.is_dragging = true;
        piece.drag_offset = offset;
        piece.drag_position = Some(origin);
        self.state = DragState::Dragging { piece: id, offset };
        true
    }

    /// Follow the pointer with the dragged piece (unsnapped).
    pub fn pointer_move(&mut self, board: &mut Board, p: Point) -> bool {
        let DragState::Dragging { piece, offset } = self.state else {
            return false;
        };
        match board.piece_mut(piece) {
            Some(piece) => {
                piece.drag_position = Some(p.offset_from(offset));
                true
            }
            None => false,
        }
    }

    /// Drop the dragged piece on the nearest cell.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn pointer_up(
        &mut self,
        board: &mut Board,
        geometry: &GridGeometry,
        p: Point,
    ) -> Option<DropOutcome> {
        let DragState::Dragging { piece, offset } = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        if let Some(dragged) = board.piece_mut(piece) {
            dragged.is_dragging = false;
            dragged.drag_position = None;
            dragged.drag_offset = Point::default();
        }

        let target = geometry.nearest_cell(p.offset_from(offset));
        match board.move_to(piece, target) {
            Some(other) => Some(DropOutcome::Swapped {
                piece,
                other,
                to: target,
            }),
            None => Some(DropOutcome::Returned { piece }),
        }
    }

    /// Abandon a drag without moving anything.
    pub fn cancel(&mut self, board: &mut Board) {
        if let DragState::Dragging { piece, .. } = self.state {
            if let Some(dragged) = board.piece_mut(piece) {
                dragged.is_dragging = false;
                dragged.drag_position = None;
                dragged.drag_offset = Point::default();
            }
        }
        self.state = DragState::Idle;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    Idle,
    Selected(PieceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(PieceId),
    Deselected(PieceId),
    Swapped { a: PieceId, b: PieceId },
    Slid { piece: PieceId, from: GridPos, to: GridPos },
    Ignored,
}

impl ClickOutcome {
    pub fn mutated(&self) -> bool {
        matches!(self, ClickOutcome::Swapped { .. } | ClickOutcome::Slid { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SelectController {
    state: SelectState,
    sliding: bool,
}

impl SelectController {
    /// `sliding` switches clicks from select/swap to slide-into-slot.
    pub fn new(sliding: bool) -> Self {
        Self {
            state: SelectState::Idle,
            sliding,
        }
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn selected(&self) -> Option<PieceId> {
        match self.state {
            SelectState::Selected(id) => Some(id),
            SelectState::Idle => None,
        }
    }

    pub fn click(&mut self, board: &mut Board, hit: Option<PieceId>) -> ClickOutcome {
        if self.sliding {
            return Self::slide_click(board, hit);
        }

        match (self.state, hit) {
            (SelectState::Idle, None) => ClickOutcome::Ignored,
            (SelectState::Idle, Some(id)) => {
                if board.piece(id).is_none() {
                    return ClickOutcome::Ignored;
                }
                self.state = SelectState::Selected(id);
                ClickOutcome::Selected(id)
            }
            (SelectState::Selected(p), Some(q)) if p == q => {
                self.state = SelectState::Idle;
                ClickOutcome::Deselected(p)
            }
            (SelectState::Selected(p), Some(q)) => {
                self.state = SelectState::Idle;
                if board.swap(p, q) {
                    ClickOutcome::Swapped { a: p, b: q }
                } else {
                    ClickOutcome::Deselected(p)
                }
            }
            (SelectState::Selected(p), None) => {
                self.state = SelectState::Idle;
                ClickOutcome::Deselected(p)
            }
        }
    }

    fn slide_click(board: &mut Board, hit: Option<PieceId>) -> ClickOutcome {
        let Some(id) = hit else {
            return ClickOutcome::Ignored;
        };
        match board.slide(id) {
            Some((from, to)) => ClickOutcome::Slid { piece: id, from, to },
            None => ClickOutcome::Ignored,
        }
    }

    pub fn clear(&mut self) {
        self.state = SelectState::Idle;
    }
}
