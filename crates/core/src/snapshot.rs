use crate::types::{GridPos, InteractionMode, PieceId, Rect};

/// Render-ready view of one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceView {
    pub id: PieceId,
    pub correct: GridPos,
    pub current: GridPos,
    /// Crop into the source image (image pixels).
    pub source: Rect,
    /// Where to draw on the surface: the current cell, or the free-form
    /// drag rectangle while dragging.
    pub dest: Rect,
    pub is_dragging: bool,
    pub is_hinted: bool,
    pub is_selected: bool,
    /// The empty slot of a sliding puzzle; renderers leave it blank.
    pub is_blank: bool,
}

/// Everything a renderer needs for one frame.
///
/// `pieces` is in paint order: the dragged piece (if any) comes last so it
/// is drawn on top and wins hit tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PuzzleSnapshot {
    pub rows: u16,
    pub cols: u16,
    pub surface: Rect,
    pub mode: Option<InteractionMode>,
    pub pieces: Vec<PieceView>,
    pub solved: bool,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub hints_remaining: u32,
    pub game_id: u32,
}

impl PuzzleSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.surface = Rect::default();
        self.mode = None;
        self.pieces.clear();
        self.solved = false;
        self.moves = 0;
        self.elapsed_ms = 0;
        self.hints_remaining = 0;
        self.game_id = 0;
    }

    /// Top-most visible piece under a surface point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<PieceId> {
        let p = crate::types::Point::new(x, y);
        self.pieces
            .iter()
            .rev()
            .find(|v| !v.is_blank && v.dest.contains(p))
            .map(|v| v.id)
    }

    pub fn piece(&self, id: PieceId) -> Option<&PieceView> {
        self.pieces.iter().find(|v| v.id == id)
    }
}
