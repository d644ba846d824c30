//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine core, rendering backends, input mapping).
//!
//! # Coordinates
//!
//! Two coordinate systems coexist:
//!
//! - **Grid** ([`GridPos`]): `(row, col)` cell addresses, `row` grows downward.
//! - **Surface** ([`Point`], [`Rect`]): free-form `f32` coordinates in whatever
//!   space the active render surface uses (pixels, terminal cells, ...).
//!
//! # Difficulty Table
//!
//! | Difficulty | Grid |
//! |------------|------|
//! | easy | 3x3 |
//! | medium | 4x4 |
//! | hard | 5x5 |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `HINT_DURATION_MS` | 3000 | How long a hint stays highlighted |
//! | `DEFAULT_HINT_BUDGET` | 3 | Hints available per session |
//!
//! # Examples
//!
//! ```
//! use tui_jigsaw_types::{Difficulty, GridPos, InteractionMode};
//!
//! let difficulty = Difficulty::from_str("Medium").unwrap();
//! assert_eq!(difficulty.grid(), (4, 4));
//!
//! let mode = InteractionMode::from_str("slide").unwrap();
//! assert_eq!(mode, InteractionMode::Slide);
//!
//! let pos = GridPos::new(1, 2);
//! assert_eq!(pos.index(4), 6);
//! assert_eq!(GridPos::from_index(6, 4), pos);
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a hinted piece stays highlighted (3 seconds)
pub const HINT_DURATION_MS: u32 = 3000;

/// Number of hints granted per session
pub const DEFAULT_HINT_BUDGET: u32 = 3;

/// Upper bound on reshuffles when a shuffle lands on the solved arrangement
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 16;

/// Identifier of a piece, equal to its row-major index in the solved grid.
pub type PieceId = usize;

/// A cell address on the puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    pub row: u16,
    pub col: u16,
}

impl GridPos {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Row-major flat index for a grid with `cols` columns.
    #[inline]
    pub fn index(&self, cols: u16) -> usize {
        (self.row as usize) * (cols as usize) + (self.col as usize)
    }

    /// Inverse of [`GridPos::index`].
    #[inline]
    pub fn from_index(index: usize, cols: u16) -> Self {
        let cols = cols.max(1) as usize;
        Self {
            row: (index / cols) as u16,
            col: (index % cols) as u16,
        }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: GridPos) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }

    /// True when the cells share an edge.
    pub fn is_adjacent(&self, other: GridPos) -> bool {
        self.manhattan(other) == 1
    }
}

/// A point on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment test (`[x, x + w)`).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Difficulty label mapped to a fixed grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_jigsaw_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("brutal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// `(rows, cols)` for this difficulty.
    pub fn grid(&self) -> (u16, u16) {
        match self {
            Difficulty::Easy => (3, 3),
            Difficulty::Medium => (4, 4),
            Difficulty::Hard => (5, 5),
        }
    }
}

/// How pointer input mutates the board.
///
/// - **Drag**: drag a piece and drop it on another cell; the occupant swaps back.
/// - **Select**: click one piece, then another, to swap them.
/// - **Slide**: classic sliding-tile puzzle; click a piece next to the empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    Drag,
    Select,
    Slide,
}

impl InteractionMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drag" => Some(InteractionMode::Drag),
            "select" | "swap" => Some(InteractionMode::Select),
            "slide" | "sliding" => Some(InteractionMode::Slide),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Drag => "drag",
            InteractionMode::Select => "select",
            InteractionMode::Slide => "slide",
        }
    }

    /// True when one cell is reserved as the empty slot.
    pub fn has_empty_slot(&self) -> bool {
        matches!(self, InteractionMode::Slide)
    }
}

/// Puzzle dimensions and image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub rows: u16,
    pub cols: u16,
    pub image: String,
    pub difficulty: Option<Difficulty>,
}

impl PuzzleConfig {
    pub fn new(rows: u16, cols: u16, image: impl Into<String>) -> Self {
        Self {
            rows,
            cols,
            image: image.into(),
            difficulty: None,
        }
    }

    /// Build a config whose grid comes from the difficulty table.
    pub fn from_difficulty(difficulty: Difficulty, image: impl Into<String>) -> Self {
        let (rows, cols) = difficulty.grid();
        Self {
            rows,
            cols,
            image: image.into(),
            difficulty: Some(difficulty),
        }
    }

    pub fn piece_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Raw pointer events as forwarded by a render backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

/// Non-pointer commands a player can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleCommand {
    /// Highlight one misplaced piece (consumes hint budget)
    Hint,
    /// Put every piece back in its correct position
    Reset,
    /// Discard the piece set and start a freshly shuffled game
    NewGame,
    /// Leave the game
    Quit,
}

/// Core-side event emitted after a placement mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// Two pieces exchanged cells
    Swapped { a: PieceId, b: PieceId },
    /// A piece slid into the empty slot
    Slid { piece: PieceId, from: GridPos, to: GridPos },
    /// A piece was highlighted as a hint
    Hinted { piece: PieceId, remaining: u32 },
    /// Every piece was put back in place
    Reset,
    /// The board transitioned into the solved state
    Completed { moves: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_defaults() {
        assert_eq!(Difficulty::Easy.grid(), (3, 3));
        assert_eq!(Difficulty::Medium.grid(), (4, 4));
        assert_eq!(Difficulty::Hard.grid(), (5, 5));
    }

    #[test]
    fn timing_defaults() {
        assert_eq!(HINT_DURATION_MS, 3000);
        assert_eq!(DEFAULT_HINT_BUDGET, 3);
    }

    #[test]
    fn grid_pos_index_round_trips_for_every_cell() {
        for index in 0..20 {
            assert_eq!(GridPos::from_index(index, 5).index(5), index);
        }
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let c = GridPos::new(1, 1);
        assert!(c.is_adjacent(GridPos::new(0, 1)));
        assert!(c.is_adjacent(GridPos::new(1, 2)));
        assert!(!c.is_adjacent(GridPos::new(0, 0)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(14.9, 14.9)));
        assert!(!r.contains(Point::new(15.0, 10.0)));
        assert!(!r.contains(Point::new(9.9, 12.0)));
    }

    #[test]
    fn config_from_difficulty_uses_table() {
        let cfg = PuzzleConfig::from_difficulty(Difficulty::Hard, "a.png");
        assert_eq!((cfg.rows, cfg.cols), (5, 5));
        assert_eq!(cfg.piece_count(), 25);
        assert_eq!(cfg.difficulty, Some(Difficulty::Hard));
    }
}
