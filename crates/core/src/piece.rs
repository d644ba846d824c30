//! Piece module - one addressable cell of the puzzle.

use crate::types::{GridPos, PieceId, Point, Rect};

/// A puzzle piece.
///
/// `correct` and `source` are fixed at creation. `current` is the only
/// placement field that mutates, and only through [`crate::Board`] so the
/// grid bijection holds. The remaining fields are transient interaction
/// state used by renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub correct: GridPos,
    pub current: GridPos,
    /// Crop rectangle into the source image, in image pixels.
    pub source: Rect,
    pub is_dragging: bool,
    /// Pointer position relative to the piece origin when the drag started.
    pub drag_offset: Point,
    /// Free-form (unsnapped) top-left while dragging.
    pub drag_position: Option<Point>,
    pub is_hinted: bool,
}

impl Piece {
    pub fn new(id: PieceId, correct: GridPos, source: Rect) -> Self {
        Self {
            id,
            correct,
            current: correct,
            source,
            is_dragging: false,
            drag_offset: Point::default(),
            drag_position: None,
            is_hinted: false,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.current == self.correct
    }

    /// Drop every transient interaction flag.
    pub fn clear_transient(&mut self) {
        self.is_dragging = false;
        self.drag_offset = Point::default();
        self.drag_position = None;
        self.is_hinted = false;
    }
}
